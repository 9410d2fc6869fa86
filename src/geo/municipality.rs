use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // <prefecture><municipality><rest>
    //
    // The prefecture is the shortest prefix ending in 都/道/府/県. 京都府 is listed
    // first, otherwise its own 都 would end the prefecture one character early.
    // The municipality is either <county>郡<town|village> or the shortest run
    // ending in 市/区/町/村.
    static ref COUNTY_RE: Regex = Regex::new(
        r"^(?:京都府|.+?[都道府県])((.+?)郡.+?[町村])"
    ).expect("Could not create regex");
    static ref MUNICIPALITY_RE: Regex = Regex::new(
        r"^(?:京都府|.+?[都道府県])(.+?[市区町村])"
    ).expect("Could not create regex");
}

/// Extracts the municipality segment of a Japanese address.
///
/// Returns `None` when the address has no recognizable prefecture or
/// municipality, never a partial segment.
pub fn extract_municipality(full_address: &str) -> Option<String> {
    if let Some(caps) = COUNTY_RE.captures(full_address) {
        if !closes_municipality(&caps[2]) {
            return Some(caps[1].to_owned());
        }
    }

    MUNICIPALITY_RE
        .captures(full_address)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

// True when the text before 郡 already holds a complete city or ward, so the
// 郡 belongs to the locality detail. 市 may end a county name (余市郡, 高市郡)
// but never sits inside one, and no county name contains 区.
fn closes_municipality(county: &str) -> bool {
    let name = county.strip_suffix('市').unwrap_or(county);
    county.contains('区') || name.contains('市')
}
