//! UK region lookup for free-text locations and postcodes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UkRegion {
    NorthEast,
    NorthWest,
    YorkshireAndTheHumber,
    EastMidlands,
    WestMidlands,
    EastOfEngland,
    London,
    SouthEast,
    SouthWest,
    Scotland,
    Wales,
    NorthernIreland,
}

use UkRegion::*;

const ALL_REGIONS: [UkRegion; 12] = [
    NorthEast,
    NorthWest,
    YorkshireAndTheHumber,
    EastMidlands,
    WestMidlands,
    EastOfEngland,
    London,
    SouthEast,
    SouthWest,
    Scotland,
    Wales,
    NorthernIreland,
];

/// Towns, cities, and counties keyed to their region. Matched as whole words.
const PLACES: &[(&str, UkRegion)] = &[
    ("newcastle", NorthEast),
    ("sunderland", NorthEast),
    ("durham", NorthEast),
    ("middlesbrough", NorthEast),
    ("darlington", NorthEast),
    ("gateshead", NorthEast),
    ("northumberland", NorthEast),
    ("manchester", NorthWest),
    ("liverpool", NorthWest),
    ("preston", NorthWest),
    ("lancaster", NorthWest),
    ("lancashire", NorthWest),
    ("chester", NorthWest),
    ("cheshire", NorthWest),
    ("carlisle", NorthWest),
    ("cumbria", NorthWest),
    ("blackpool", NorthWest),
    ("bolton", NorthWest),
    ("stockport", NorthWest),
    ("warrington", NorthWest),
    ("leeds", YorkshireAndTheHumber),
    ("sheffield", YorkshireAndTheHumber),
    ("bradford", YorkshireAndTheHumber),
    ("hull", YorkshireAndTheHumber),
    ("york", YorkshireAndTheHumber),
    ("yorkshire", YorkshireAndTheHumber),
    ("doncaster", YorkshireAndTheHumber),
    ("wakefield", YorkshireAndTheHumber),
    ("huddersfield", YorkshireAndTheHumber),
    ("rotherham", YorkshireAndTheHumber),
    ("derby", EastMidlands),
    ("derbyshire", EastMidlands),
    ("nottingham", EastMidlands),
    ("nottinghamshire", EastMidlands),
    ("leicester", EastMidlands),
    ("leicestershire", EastMidlands),
    ("lincoln", EastMidlands),
    ("lincolnshire", EastMidlands),
    ("northampton", EastMidlands),
    ("northamptonshire", EastMidlands),
    ("chesterfield", EastMidlands),
    ("birmingham", WestMidlands),
    ("coventry", WestMidlands),
    ("wolverhampton", WestMidlands),
    ("stoke", WestMidlands),
    ("staffordshire", WestMidlands),
    ("worcester", WestMidlands),
    ("hereford", WestMidlands),
    ("shropshire", WestMidlands),
    ("telford", WestMidlands),
    ("walsall", WestMidlands),
    ("cambridge", EastOfEngland),
    ("cambridgeshire", EastOfEngland),
    ("norwich", EastOfEngland),
    ("norfolk", EastOfEngland),
    ("ipswich", EastOfEngland),
    ("suffolk", EastOfEngland),
    ("colchester", EastOfEngland),
    ("chelmsford", EastOfEngland),
    ("essex", EastOfEngland),
    ("luton", EastOfEngland),
    ("peterborough", EastOfEngland),
    ("southend", EastOfEngland),
    ("hertfordshire", EastOfEngland),
    ("london", London),
    ("westminster", London),
    ("camden", London),
    ("hackney", London),
    ("croydon", London),
    ("islington", London),
    ("brighton", SouthEast),
    ("oxford", SouthEast),
    ("oxfordshire", SouthEast),
    ("reading", SouthEast),
    ("southampton", SouthEast),
    ("portsmouth", SouthEast),
    ("milton keynes", SouthEast),
    ("canterbury", SouthEast),
    ("guildford", SouthEast),
    ("maidstone", SouthEast),
    ("kent", SouthEast),
    ("surrey", SouthEast),
    ("sussex", SouthEast),
    ("hampshire", SouthEast),
    ("berkshire", SouthEast),
    ("bristol", SouthWest),
    ("bath", SouthWest),
    ("exeter", SouthWest),
    ("plymouth", SouthWest),
    ("gloucester", SouthWest),
    ("gloucestershire", SouthWest),
    ("swindon", SouthWest),
    ("bournemouth", SouthWest),
    ("truro", SouthWest),
    ("cornwall", SouthWest),
    ("devon", SouthWest),
    ("somerset", SouthWest),
    ("dorset", SouthWest),
    ("edinburgh", Scotland),
    ("glasgow", Scotland),
    ("aberdeen", Scotland),
    ("dundee", Scotland),
    ("inverness", Scotland),
    ("stirling", Scotland),
    ("perth", Scotland),
    ("cardiff", Wales),
    ("swansea", Wales),
    ("newport", Wales),
    ("wrexham", Wales),
    ("aberystwyth", Wales),
    ("belfast", NorthernIreland),
    ("derry", NorthernIreland),
    ("londonderry", NorthernIreland),
    ("lisburn", NorthernIreland),
];

/// Postcode areas (the leading letters of an outward code).
const POSTCODE_AREAS: &[(&str, UkRegion)] = &[
    ("NE", NorthEast),
    ("SR", NorthEast),
    ("DH", NorthEast),
    ("DL", NorthEast),
    ("TS", NorthEast),
    ("M", NorthWest),
    ("L", NorthWest),
    ("WA", NorthWest),
    ("WN", NorthWest),
    ("BL", NorthWest),
    ("OL", NorthWest),
    ("SK", NorthWest),
    ("PR", NorthWest),
    ("BB", NorthWest),
    ("FY", NorthWest),
    ("LA", NorthWest),
    ("CA", NorthWest),
    ("CH", NorthWest),
    ("CW", NorthWest),
    ("LS", YorkshireAndTheHumber),
    ("BD", YorkshireAndTheHumber),
    ("HX", YorkshireAndTheHumber),
    ("HD", YorkshireAndTheHumber),
    ("WF", YorkshireAndTheHumber),
    ("S", YorkshireAndTheHumber),
    ("DN", YorkshireAndTheHumber),
    ("HU", YorkshireAndTheHumber),
    ("YO", YorkshireAndTheHumber),
    ("HG", YorkshireAndTheHumber),
    ("DE", EastMidlands),
    ("NG", EastMidlands),
    ("LE", EastMidlands),
    ("LN", EastMidlands),
    ("NN", EastMidlands),
    ("B", WestMidlands),
    ("CV", WestMidlands),
    ("WV", WestMidlands),
    ("WS", WestMidlands),
    ("DY", WestMidlands),
    ("ST", WestMidlands),
    ("TF", WestMidlands),
    ("WR", WestMidlands),
    ("HR", WestMidlands),
    ("CB", EastOfEngland),
    ("IP", EastOfEngland),
    ("NR", EastOfEngland),
    ("CO", EastOfEngland),
    ("CM", EastOfEngland),
    ("SS", EastOfEngland),
    ("LU", EastOfEngland),
    ("SG", EastOfEngland),
    ("AL", EastOfEngland),
    ("PE", EastOfEngland),
    ("E", London),
    ("EC", London),
    ("N", London),
    ("NW", London),
    ("SE", London),
    ("SW", London),
    ("W", London),
    ("WC", London),
    ("BR", London),
    ("CR", London),
    ("EN", London),
    ("HA", London),
    ("IG", London),
    ("KT", London),
    ("RM", London),
    ("SM", London),
    ("TW", London),
    ("UB", London),
    ("BN", SouthEast),
    ("RH", SouthEast),
    ("GU", SouthEast),
    ("PO", SouthEast),
    ("SO", SouthEast),
    ("OX", SouthEast),
    ("RG", SouthEast),
    ("SL", SouthEast),
    ("HP", SouthEast),
    ("MK", SouthEast),
    ("TN", SouthEast),
    ("ME", SouthEast),
    ("CT", SouthEast),
    ("DA", SouthEast),
    ("BS", SouthWest),
    ("BA", SouthWest),
    ("GL", SouthWest),
    ("EX", SouthWest),
    ("PL", SouthWest),
    ("TQ", SouthWest),
    ("TR", SouthWest),
    ("TA", SouthWest),
    ("BH", SouthWest),
    ("DT", SouthWest),
    ("SP", SouthWest),
    ("SN", SouthWest),
    ("EH", Scotland),
    ("G", Scotland),
    ("AB", Scotland),
    ("DD", Scotland),
    ("KY", Scotland),
    ("FK", Scotland),
    ("PA", Scotland),
    ("IV", Scotland),
    ("KA", Scotland),
    ("ML", Scotland),
    ("DG", Scotland),
    ("TD", Scotland),
    ("PH", Scotland),
    ("KW", Scotland),
    ("HS", Scotland),
    ("ZE", Scotland),
    ("CF", Wales),
    ("SA", Wales),
    ("NP", Wales),
    ("LL", Wales),
    ("LD", Wales),
    ("BT", NorthernIreland),
];

impl UkRegion {
    pub fn nation(&self) -> &'static str {
        match self {
            Scotland => "Scotland",
            Wales => "Wales",
            NorthernIreland => "Northern Ireland",
            _ => "England",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            NorthEast => &["north east", "north east england"],
            NorthWest => &["north west", "north west england"],
            YorkshireAndTheHumber => &["yorkshire and the humber", "yorkshire and humber"],
            EastMidlands => &["east midlands"],
            WestMidlands => &["west midlands"],
            EastOfEngland => &["east of england", "eastern england", "east anglia"],
            London => &["london", "greater london"],
            SouthEast => &["south east", "south east england"],
            SouthWest => &["south west", "south west england"],
            Scotland => &["scotland"],
            Wales => &["wales", "cymru"],
            NorthernIreland => &["northern ireland"],
        }
    }

    /// Resolves a region name, town, county, or postcode into a region.
    pub fn resolve(location: &str) -> Option<Self> {
        let words = word_form(location);
        if words.is_empty() {
            return None;
        }

        if let Some(region) = ALL_REGIONS
            .iter()
            .find(|region| region.aliases().iter().any(|alias| *alias == words))
        {
            return Some(*region);
        }

        let padded = format!(" {words} ");
        if let Some((_, region)) = PLACES
            .iter()
            .find(|(place, _)| padded.contains(&format!(" {place} ")))
        {
            return Some(*region);
        }

        location.split_whitespace().find_map(postcode_region)
    }
}

/// Lowercases and replaces punctuation with single spaces.
pub(crate) fn word_form(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn postcode_region(token: &str) -> Option<UkRegion> {
    let token = token.trim().to_ascii_uppercase();
    let area: String = token.chars().take_while(char::is_ascii_alphabetic).collect();
    if area.is_empty() || area.len() > 2 {
        return None;
    }

    let follows_digit = token[area.len()..]
        .chars()
        .next()
        .map(|c| c.is_ascii_digit())
        .unwrap_or(false);
    if !follows_digit {
        return None;
    }

    POSTCODE_AREAS
        .iter()
        .find(|(code, _)| *code == area)
        .map(|(_, region)| *region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_form_lowercases_beyond_ascii() {
        assert_eq!(word_form("ÉNERGIE Verte"), "énergie verte");
        assert_eq!(word_form("énergie-verte"), word_form("ÉNERGIE VERTE"));
    }

    #[test]
    fn resolves_towns_and_counties() {
        assert_eq!(UkRegion::resolve("Derby"), Some(EastMidlands));
        assert_eq!(UkRegion::resolve("Milton Keynes, Bucks"), Some(SouthEast));
        assert_eq!(UkRegion::resolve("North Yorkshire"), Some(YorkshireAndTheHumber));
        assert_eq!(UkRegion::resolve("Cardiff Bay"), Some(Wales));
    }

    #[test]
    fn resolves_region_names() {
        assert_eq!(UkRegion::resolve("East Midlands"), Some(EastMidlands));
        assert_eq!(
            UkRegion::resolve("Yorkshire & the Humber"),
            Some(YorkshireAndTheHumber)
        );
        assert_eq!(
            UkRegion::resolve("Yorkshire and the Humber"),
            Some(YorkshireAndTheHumber)
        );
        assert_eq!(UkRegion::resolve("Greater London"), Some(London));
    }

    #[test]
    fn resolves_postcodes_by_area() {
        assert_eq!(UkRegion::resolve("DE1 3AH"), Some(EastMidlands));
        assert_eq!(UkRegion::resolve("B1 1AA"), Some(WestMidlands));
        assert_eq!(UkRegion::resolve("BS1 4DJ"), Some(SouthWest));
        assert_eq!(UkRegion::resolve("sw1a 1aa"), Some(London));
        assert_eq!(UkRegion::resolve("BT7 1NN"), Some(NorthernIreland));
    }

    #[test]
    fn unknown_locations_resolve_to_none() {
        assert_eq!(UkRegion::resolve(""), None);
        assert_eq!(UkRegion::resolve("Atlantis"), None);
        assert_eq!(UkRegion::resolve("QQ9 9ZZ"), None);
    }

    #[test]
    fn nations_group_english_regions() {
        assert_eq!(EastMidlands.nation(), "England");
        assert_eq!(Wales.nation(), "Wales");
    }
}
