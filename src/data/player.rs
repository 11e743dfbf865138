//! Player biography page.

use std::collections::HashMap;

use scraper::Html;

use crate::data::client::BASE_URL;
use crate::data::html::{element_text, selector};
use crate::domain::{PlayerInfo, PlayerRef};
use crate::error::AppError;
use crate::normalize::bio::player_info_from_facts;
use crate::normalize::values::clean_text;

pub fn player_url(player: &PlayerRef) -> String {
    format!("{BASE_URL}/player/{}/{}", player.player_id, player.shortname)
}

/// Parse the name heading and the `.player-facts` list of a player page.
pub fn parse_player_page(html: &str, player: &PlayerRef) -> Result<PlayerInfo, AppError> {
    let document = Html::parse_document(html);
    let name_sel = selector("h1.player-name")?;
    let item_sel = selector(".player-facts li")?;
    let label_sel = selector(".label")?;
    let value_sel = selector(".value")?;

    let player_name = document
        .select(&name_sel)
        .next()
        .and_then(|h| clean_text(&element_text(&h)));

    let mut facts = HashMap::new();
    for item in document.select(&item_sel) {
        let label = item.select(&label_sel).next().map(|l| element_text(&l));
        let value = item.select(&value_sel).next().map(|v| element_text(&v));
        if let (Some(label), Some(value)) = (label, value) {
            facts.insert(label.to_lowercase(), value);
        }
    }

    if player_name.is_none() && facts.is_empty() {
        return Err(AppError::parse(format!(
            "Player page for {} ({}) has no name or facts.",
            player.shortname, player.player_id
        )));
    }

    Ok(player_info_from_facts(player, player_name, &facts))
}
