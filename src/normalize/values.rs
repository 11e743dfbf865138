//! Cell-level coercion shared by the page parsers and the normalizers.

use std::sync::LazyLock;

use regex::Regex;

static ENTITY_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(player|team)/(\d+)/([^/?#]+)").expect("entity href pattern is valid")
});

static NAME_WITH_POSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.*?)\s*\((?P<pos>[^()]*)\)\s*$").expect("name pattern is valid")
});

/// Counting stat. Placeholders (`-`, empty) and anything non-numeric read as zero.
pub fn parse_count(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}

/// Signed stat such as plus-minus (`-3`, `+4`). A lone `-` is a placeholder.
pub fn parse_signed(raw: &str) -> i32 {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    trimmed.parse::<i32>().unwrap_or(0)
}

/// Ratio stat such as GAA or SV%. Placeholders read as missing.
pub fn parse_ratio(raw: &str) -> Option<f64> {
    let v = raw.trim().parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// Text fact; `-` and empty strings are missing.
pub fn clean_text(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.as_str() {
        "" | "-" => None,
        _ => Some(collapsed),
    }
}

/// Extract `(id, shortname)` from a `/player/{id}/{slug}` or `/team/{id}/{slug}` link.
///
/// `kind` is `"player"` or `"team"`; links of the other kind yield `None`.
pub fn parse_entity_href(href: &str, kind: &str) -> Option<(u64, String)> {
    let caps = ENTITY_HREF.captures(href)?;
    if &caps[1] != kind {
        return None;
    }
    let id = caps[2].parse().ok()?;
    Some((id, caps[3].to_string()))
}

/// Split a `Name (POS)` cell into the name and the position label.
pub fn split_name_position(cell: &str) -> (String, Option<String>) {
    let cell = cell.split_whitespace().collect::<Vec<_>>().join(" ");
    match NAME_WITH_POSITION.captures(&cell) {
        Some(caps) => (caps["name"].to_string(), clean_text(&caps["pos"])),
        None => (cell, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_become_zero() {
        assert_eq!(parse_count("-"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count(" 42 "), 42);
        assert_eq!(parse_count("n/a"), 0);
    }

    #[test]
    fn plus_minus_keeps_sign() {
        assert_eq!(parse_signed("-3"), -3);
        assert_eq!(parse_signed("+4"), 4);
        assert_eq!(parse_signed("-"), 0);
    }

    #[test]
    fn ratios_accept_leading_dot() {
        assert_eq!(parse_ratio(".915"), Some(0.915));
        assert_eq!(parse_ratio("2.45"), Some(2.45));
        assert_eq!(parse_ratio("-"), None);
        assert_eq!(parse_ratio("NaN"), None);
    }

    #[test]
    fn entity_href_handles_absolute_and_relative_links() {
        assert_eq!(
            parse_entity_href("https://www.eliteprospects.com/player/183442/connor-mcdavid", "player"),
            Some((183442, "connor-mcdavid".to_string()))
        );
        assert_eq!(
            parse_entity_href("/team/76/toronto-maple-leafs/2019-2020?tab=stats", "team"),
            Some((76, "toronto-maple-leafs".to_string()))
        );
        assert_eq!(parse_entity_href("/team/76/toronto-maple-leafs", "player"), None);
        assert_eq!(parse_entity_href("/player/abc/x", "player"), None);
    }

    #[test]
    fn name_cell_splits_position() {
        assert_eq!(
            split_name_position("Connor  McDavid (C)"),
            ("Connor McDavid".to_string(), Some("C".to_string()))
        );
        assert_eq!(
            split_name_position("Leon Draisaitl (C/LW)"),
            ("Leon Draisaitl".to_string(), Some("C/LW".to_string()))
        );
        assert_eq!(split_name_position("Mikko Koskinen"), ("Mikko Koskinen".to_string(), None));
    }
}
