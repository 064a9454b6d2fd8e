//! Domain keyword bank for RFP page triage.
//!
//! Categories and phrases track the vocabulary that shows up in LED
//! display RFPs: product names, spec sheet terms, division-26
//! electrical language, structural/rigging scope, installation and
//! commercial terms, and the manufacturers we compete against.

/// One named group of trigger phrases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCategory {
    pub name: String,
    pub keywords: Vec<String>,
}

/// The full phrase bank pages are scored against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordBank {
    categories: Vec<KeywordCategory>,
}

impl Default for KeywordBank {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KeywordBank {
    /// The built-in nine-category bank.
    pub fn builtin() -> Self {
        let categories = vec![
            category(
                "display_hardware",
                &[
                    "led display", "led screen", "led wall", "video display", "video wall",
                    "video board", "scoreboard", "ribbon board", "fascia", "marquee",
                    "digital signage", "display system", "led module", "led panel",
                    "led tile", "led cabinet", "direct view led", "dvled", "fine pitch",
                    "narrow pixel pitch", "smd led", "cob led", "micro led",
                    "transparent led", "flexible led", "curved display", "outdoor led",
                    "indoor led", "led mesh", "led curtain", "led strip", "pixel board",
                ],
            ),
            category(
                "specs",
                &[
                    "pixel pitch", "pixel density", "resolution", "brightness", "nit",
                    "candela", "contrast ratio", "refresh rate", "viewing angle",
                    "viewing distance", "color depth", "bit depth", "grayscale",
                    "gamut", "hdr", "ip rating", "ip65", "ip54", "ingress protection",
                    "operating temperature", "power consumption", "wattage",
                    "btu", "weight per panel", "panel dimension", "module size",
                    "cabinet size", "aspect ratio", "scan rate", "uniformity",
                    "mtbf", "mean time between failure", "lifespan", "lifecycle",
                    "luminance", "chromaticity",
                ],
            ),
            category(
                "electrical",
                &[
                    "electrical", "power distribution", "power supply", "pdu",
                    "circuit breaker", "amperage", "voltage", "120v", "208v", "240v",
                    "480v", "single phase", "three phase", "conduit", "wire gauge",
                    "awg", "junction box", "disconnect", "transformer", "ups",
                    "uninterruptible", "backup power", "generator", "ground fault",
                    "gfci", "arc fault", "nec", "electrical code", "load calculation",
                    "demand factor", "cat5", "cat6", "cat6a", "fiber optic",
                    "data cable", "ethernet", "network switch", "patch panel",
                    "data drop", "data count", "fiber strand", "single mode",
                    "multi mode", "hdmi", "sdi", "displayport", "dvi",
                    "signal distribution", "video processor", "scaler", "switcher",
                    "media player", "content management", "cms", "controller",
                    "receiving card", "sending card",
                ],
            ),
            category(
                "structural",
                &[
                    "structural", "steel", "mounting", "bracket", "cleat",
                    "z-clip", "unistrut", "framing", "sub-structure", "substrate",
                    "rigging", "flyware", "truss", "hoist", "motor", "chain hoist",
                    "load bearing", "dead load", "live load", "wind load",
                    "seismic", "anchorage", "anchor bolt", "concrete embed",
                    "welding", "galvanized", "powder coat", "stainless",
                    "aluminum extrusion", "pe stamp", "structural engineer",
                    "structural calculation", "deflection", "moment", "shear",
                    "bearing plate", "base plate", "column", "beam",
                    "cantilever", "outrigger",
                ],
            ),
            category(
                "installation",
                &[
                    "installation", "install", "labor", "man hours", "crew",
                    "mobilization", "demobilization", "scaffolding", "lift",
                    "boom lift", "scissor lift", "crane", "aerial work platform",
                    "safety harness", "fall protection", "osha", "ppe",
                    "commissioning", "testing", "alignment", "calibration",
                    "training", "warranty", "maintenance", "service agreement",
                    "preventive maintenance", "spare parts", "on-site support",
                    "remote support", "noc", "network operations",
                    "punch list", "substantial completion", "final completion",
                    "certificate of occupancy", "closeout", "as-built",
                    "shop drawing", "submittal",
                ],
            ),
            category(
                "control_data",
                &[
                    "control system", "control room", "noc", "network operations center",
                    "content management", "cms", "scheduling software", "playlist",
                    "novastar", "brompton", "colorlight", "dbstar",
                    "video processor", "scaler", "switcher", "matrix switcher",
                    "media server", "brightsign", "crestron", "extron",
                    "dante", "artnet", "dmx", "rs232", "rs485", "tcp ip",
                    "api integration", "remote monitoring", "snmp",
                    "redundancy", "failover", "backup system",
                ],
            ),
            category(
                "permits_logistics",
                &[
                    "permit", "building permit", "electrical permit", "inspection",
                    "code compliance", "building code", "fire code", "ada",
                    "accessibility", "zoning", "variance", "hoa",
                    "shipping", "freight", "crating", "packaging",
                    "customs", "import", "tariff", "duty", "bonded warehouse",
                    "staging", "laydown area", "storage", "receiving dock",
                    "delivery schedule", "lead time", "manufacturing time",
                    "production schedule",
                ],
            ),
            category(
                "commercial",
                &[
                    "bid form", "bid bond", "performance bond", "payment bond",
                    "surety", "insurance", "certificate of insurance", "coi",
                    "indemnification", "liability", "liquidated damages",
                    "retainage", "retention", "change order", "rfi",
                    "request for information", "addendum", "amendment",
                    "scope of work", "sow", "specification", "division 11",
                    "division 10", "division 26", "division 27", "division 28",
                    "csi", "masterformat", "prevailing wage", "davis bacon",
                    "union", "non union", "minority participation", "mbe", "wbe",
                    "dbe", "subcontractor", "general contractor", "owner",
                    "architect", "consultant", "engineer of record",
                    "base bid", "alternate", "option", "allowance",
                    "unit price", "lump sum", "guaranteed maximum price", "gmp",
                    "cost plus", "time and materials", "milestone", "phase",
                    "schedule of values", "pay application", "invoice",
                    "net 30", "net 60", "progress payment",
                ],
            ),
            category(
                "manufacturers",
                &[
                    "lg", "samsung", "daktronics", "watchfire", "yaham",
                    "absen", "leyard", "planar", "unilumin", "roe visual",
                    "barco", "christie", "nec", "sharp", "sony",
                    "mitsubishi", "lighthouse", "sna displays", "nanolumens",
                    "optec", "formetco", "vanguard", "dicolor", "aoto",
                    "infiled", "novastar", "colorlight", "brompton",
                    "megapixel vr", "elation", "martin", "chauvet",
                ],
            ),
        ];
        KeywordBank { categories }
    }

    /// Drop the named categories (e.g., "manufacturers" when scoring a
    /// sole-source RFP where vendor names are noise).
    pub fn without_categories(mut self, disabled: &[&str]) -> Self {
        self.categories
            .retain(|c| !disabled.contains(&c.name.as_str()));
        self
    }

    /// Append a caller-supplied "custom" category.
    pub fn with_custom_keywords(mut self, keywords: Vec<String>) -> Self {
        if !keywords.is_empty() {
            self.categories.push(KeywordCategory {
                name: "custom".to_string(),
                keywords,
            });
        }
        self
    }

    pub fn categories(&self) -> &[KeywordCategory] {
        &self.categories
    }

    pub fn phrase_count(&self) -> usize {
        self.categories.iter().map(|c| c.keywords.len()).sum()
    }
}

fn category(name: &str, keywords: &[&str]) -> KeywordCategory {
    KeywordCategory {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bank_has_nine_categories() {
        let bank = KeywordBank::builtin();
        assert_eq!(bank.categories().len(), 9);
        assert!(bank.phrase_count() > 250);
    }

    #[test]
    fn test_without_categories() {
        let bank = KeywordBank::builtin().without_categories(&["manufacturers", "commercial"]);
        assert_eq!(bank.categories().len(), 7);
        assert!(!bank.categories().iter().any(|c| c.name == "manufacturers"));
    }

    #[test]
    fn test_with_custom_keywords() {
        let bank =
            KeywordBank::builtin().with_custom_keywords(vec!["halo board".to_string()]);
        assert_eq!(bank.categories().len(), 10);
        assert_eq!(bank.categories().last().unwrap().name, "custom");
    }

    #[test]
    fn test_empty_custom_keywords_ignored() {
        let bank = KeywordBank::builtin().with_custom_keywords(vec![]);
        assert_eq!(bank.categories().len(), 9);
    }
}
