//! HTML fixtures shaped like the live pages, shared by parser and pipeline tests.

pub const STANDINGS_HTML: &str = r#"
<html><body>
<table class="table standings">
  <thead>
    <tr><th>#</th><th>Team</th><th>GP</th><th>W</th><th>T</th><th>L</th><th>OTW</th><th>OTL</th><th>GF</th><th>GA</th><th>+/-</th><th>TP</th></tr>
  </thead>
  <tbody>
    <tr class="title"><td colspan="12">Atlantic Division</td></tr>
    <tr>
      <td>1</td>
      <td><a href="https://www.eliteprospects.com/team/64/boston-bruins/2019-2020">Boston Bruins</a></td>
      <td>70</td><td>44</td><td>-</td><td>14</td><td>0</td><td>12</td><td>227</td><td>174</td><td>53</td><td>100</td>
    </tr>
    <tr>
      <td>2</td>
      <td><a href="https://www.eliteprospects.com/team/76/toronto-maple-leafs/2019-2020">Toronto Maple Leafs</a></td>
      <td>70</td><td>36</td><td>-</td><td>25</td><td>0</td><td>9</td><td>238</td><td>227</td><td>11</td><td>81</td>
    </tr>
    <tr class="title"><td colspan="12">Metropolitan Division</td></tr>
    <tr>
      <td>1</td>
      <td><a href="/team/70/washington-capitals/2019-2020">Washington Capitals</a></td>
      <td>69</td><td>41</td><td>-</td><td>20</td><td>0</td><td>8</td><td>240</td><td>215</td><td>25</td><td>90</td>
    </tr>
  </tbody>
</table>
</body></html>
"#;

/// One team with two skater stages and one goalie table.
pub const TEAM_STATS_HTML: &str = r#"
<html><body>
<table class="table skater-stats">
  <caption>Regular Season</caption>
  <thead>
    <tr><th>#</th><th>Player</th><th>GP</th><th>G</th><th>A</th><th>TP</th><th>PIM</th><th>+/-</th></tr>
  </thead>
  <tbody>
    <tr><td>97</td><td><a href="/player/183442/connor-mcdavid">Connor McDavid</a> (C)</td><td>64</td><td>34</td><td>63</td><td>97</td><td>28</td><td>-6</td></tr>
    <tr><td>29</td><td><a href="/player/130383/leon-draisaitl">Leon Draisaitl</a> (C/LW)</td><td>71</td><td>43</td><td>67</td><td>110</td><td>18</td><td>-7</td></tr>
    <tr><td>2</td><td><a href="/player/9999/scratch-defender">Scratch Defender</a> (D)</td><td>-</td><td>-</td><td>-</td><td>-</td><td>-</td><td>-</td></tr>
    <tr class="total"><td></td><td>Totals</td><td>71</td><td>77</td><td>130</td><td>207</td><td>46</td><td>-13</td></tr>
  </tbody>
</table>
<table class="table skater-stats">
  <caption>Playoffs</caption>
  <thead>
    <tr><th>#</th><th>Player</th><th>GP</th><th>G</th><th>A</th><th>TP</th><th>PIM</th><th>+/-</th></tr>
  </thead>
  <tbody>
    <tr><td>97</td><td><a href="/player/183442/connor-mcdavid">Connor McDavid</a> (C)</td><td>4</td><td>5</td><td>4</td><td>9</td><td>2</td><td>+2</td></tr>
  </tbody>
</table>
<table class="table goalie-stats">
  <thead>
    <tr><th>#</th><th>Player</th><th>GP</th><th>GAA</th><th>SV%</th></tr>
  </thead>
  <tbody>
    <tr><td>19</td><td><a href="/player/9678/mikko-koskinen">Mikko Koskinen</a></td><td>38</td><td>2.75</td><td>.917</td></tr>
  </tbody>
</table>
</body></html>
"#;

pub const PLAYER_HTML: &str = r#"
<html><body>
<h1 class="player-name"> Connor McDavid </h1>
<ul class="player-facts">
  <li><span class="label">Date of Birth</span><span class="value">Jan 13, 1997</span></li>
  <li><span class="label">Place of Birth</span><span class="value">Richmond Hill, ON, CAN</span></li>
  <li><span class="label">Nation</span><span class="value">Canada</span></li>
  <li><span class="label">Position</span><span class="value">C</span></li>
  <li><span class="label">Shoots</span><span class="value">L</span></li>
  <li><span class="label">Height</span><span class="value">6'1" / 185 cm</span></li>
  <li><span class="label">Weight</span><span class="value">193 lbs / 88 kg</span></li>
  <li><span class="label">Drafted</span><span class="value">2015 round 1 #1 overall by Edmonton Oilers</span></li>
  <li><span class="label">NHL Rights</span><span class="value">Edmonton Oilers / Signed</span></li>
</ul>
</body></html>
"#;
