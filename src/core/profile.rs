use serde::{Deserialize, Serialize};

/// Profile levels, ordered by how much of the model a profile carries.
pub mod level {
    pub const UNKNOWN: u8 = 0;
    pub const MINIMUM: u8 = 1;
    pub const BASIC_WL: u8 = 2;
    pub const BASIC: u8 = 3;
    pub const EN16931: u8 = 4;
    pub const EXTENDED: u8 = 5;
}

/// EN 16931 specification identifier (BT-24).
pub const EN16931_URN: &str = "urn:cen.eu:en16931:2017";

/// PEPPOL BIS Billing 3.0 specification identifier (BT-24).
pub const PEPPOL_URN: &str =
    "urn:cen.eu:en16931:2017#compliant#urn:fdc:peppol.eu:2017:poacc:billing:3.0";

/// XRechnung 3.0 specification identifier (BT-24).
pub const XRECHNUNG_URN: &str =
    "urn:cen.eu:en16931:2017#compliant#urn:xeinkauf.de:kosit:xrechnung_3.0";

/// XRechnung 3.0 extension specification identifier (BT-24).
pub const XRECHNUNG_EXTENSION_URN: &str = "urn:cen.eu:en16931:2017#compliant#urn:xeinkauf.de:kosit:xrechnung_3.0#conformant#urn:xeinkauf.de:kosit:extension:xrechnung_3.0";

/// Business process prefix marking a PEPPOL BIS Billing document (BT-23).
pub const PEPPOL_PROCESS_PREFIX: &str = "urn:fdc:peppol.eu:2017:poacc:billing:";

/// Default PEPPOL business process (BT-23).
pub const PEPPOL_PROCESS_ID: &str = "urn:fdc:peppol.eu:2017:poacc:billing:01:1.0";

/// Conformance profile of an invoice, derived from its specification identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Profile {
    /// Unrecognised specification identifier.
    #[default]
    Unknown,
    /// Factur-X / ZUGFeRD MINIMUM.
    Minimum,
    /// Factur-X / ZUGFeRD BASIC WL (no lines).
    BasicWl,
    /// Factur-X / ZUGFeRD BASIC.
    Basic,
    /// Plain EN 16931.
    En16931,
    /// PEPPOL BIS Billing 3.0.
    Peppol,
    /// XRechnung (CIUS Germany).
    XRechnung,
    /// XRechnung extension.
    XRechnungExtension,
    /// Factur-X / ZUGFeRD EXTENDED.
    Extended,
}

impl Profile {
    /// Classify a specification identifier (BT-24), refined by the
    /// business process (BT-23): a plain EN 16931 document with a PEPPOL
    /// business process is a PEPPOL document.
    pub fn classify(specification_id: &str, business_process: Option<&str>) -> Self {
        let urn = specification_id.trim().to_ascii_lowercase();
        let profile = if urn.is_empty() {
            Self::Unknown
        } else if urn.contains("#conformant#urn:xeinkauf.de:kosit:extension:xrechnung") {
            Self::XRechnungExtension
        } else if urn.contains(":kosit:xrechnung_")
            || urn.contains(":kosit:standard:xrechnung_")
        {
            Self::XRechnung
        } else if urn.contains("urn:fdc:peppol.eu:2017:poacc:billing:3.0") {
            Self::Peppol
        } else if urn.ends_with(":extended") {
            Self::Extended
        } else if urn.ends_with(":basicwl") {
            Self::BasicWl
        } else if urn.ends_with(":basic") {
            Self::Basic
        } else if urn.ends_with(":minimum") {
            Self::Minimum
        } else if urn == EN16931_URN || urn.starts_with("urn:cen.eu:en16931:2017#compliant#") {
            Self::En16931
        } else {
            Self::Unknown
        };

        let peppol_process = business_process
            .is_some_and(|bp| bp.trim().starts_with(PEPPOL_PROCESS_PREFIX));
        if profile == Self::En16931 && peppol_process {
            Self::Peppol
        } else {
            profile
        }
    }

    /// Numeric level used to gate rules and serialisation.
    pub fn level(&self) -> u8 {
        match self {
            Self::Unknown => level::UNKNOWN,
            Self::Minimum => level::MINIMUM,
            Self::BasicWl => level::BASIC_WL,
            Self::Basic => level::BASIC,
            Self::En16931 | Self::Peppol | Self::XRechnung => level::EN16931,
            Self::XRechnungExtension | Self::Extended => level::EXTENDED,
        }
    }

    /// Short profile tag (e.g. "basicwl", "xrechnung").
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Minimum => "minimum",
            Self::BasicWl => "basicwl",
            Self::Basic => "basic",
            Self::En16931 => "en16931",
            Self::Peppol => "peppol",
            Self::XRechnung => "xrechnung",
            Self::XRechnungExtension => "xrechnung-extension",
            Self::Extended => "extended",
        }
    }

    /// Canonical specification identifier written for this profile.
    pub fn urn(&self) -> &'static str {
        match self {
            Self::Unknown => "",
            Self::Minimum => "urn:factur-x.eu:1p0:minimum",
            Self::BasicWl => "urn:factur-x.eu:1p0:basicwl",
            Self::Basic => "urn:cen.eu:en16931:2017#compliant#urn:factur-x.eu:1p0:basic",
            Self::En16931 => EN16931_URN,
            Self::Peppol => PEPPOL_URN,
            Self::XRechnung => XRECHNUNG_URN,
            Self::XRechnungExtension => XRECHNUNG_EXTENSION_URN,
            Self::Extended => "urn:cen.eu:en16931:2017#conformant#urn:factur-x.eu:1p0:extended",
        }
    }

    pub fn is_peppol(&self) -> bool {
        *self == Self::Peppol
    }

    pub fn is_xrechnung(&self) -> bool {
        matches!(self, Self::XRechnung | Self::XRechnungExtension)
    }

    /// Whether the profile carries data introduced at `min` or below.
    pub fn covers(&self, min: u8) -> bool {
        self.level() >= min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factur_x_and_zugferd_urns() {
        let cases = [
            ("urn:factur-x.eu:1p0:minimum", Profile::Minimum),
            ("urn:zugferd.de:2p0:minimum", Profile::Minimum),
            ("urn:factur-x.eu:1p0:basicwl", Profile::BasicWl),
            ("urn:zugferd.de:2p0:basicwl", Profile::BasicWl),
            ("urn:cen.eu:en16931:2017#compliant#urn:factur-x.eu:1p0:basic", Profile::Basic),
            ("urn:cen.eu:en16931:2017#compliant#urn:zugferd.de:2p0:basic", Profile::Basic),
            ("urn:cen.eu:en16931:2017", Profile::En16931),
            ("urn:cen.eu:en16931:2017#conformant#urn:factur-x.eu:1p0:extended", Profile::Extended),
            ("urn:cen.eu:en16931:2017#conformant#urn:zugferd.de:2p0:extended", Profile::Extended),
        ];
        for (urn, expected) in cases {
            assert_eq!(Profile::classify(urn, None), expected, "{urn}");
        }
    }

    #[test]
    fn xrechnung_versions() {
        for urn in [
            "urn:cen.eu:en16931:2017#compliant#urn:xeinkauf.de:kosit:xrechnung_3.0",
            "urn:cen.eu:en16931:2017#compliant#urn:xoev-de:kosit:standard:xrechnung_2.3",
            "urn:cen.eu:en16931:2017#compliant#urn:xeinkauf.de:kosit:xrechnung_2.0",
        ] {
            let profile = Profile::classify(urn, None);
            assert_eq!(profile, Profile::XRechnung, "{urn}");
            assert!(profile.is_xrechnung());
            assert_eq!(profile.level(), level::EN16931);
        }
        let ext = Profile::classify(XRECHNUNG_EXTENSION_URN, None);
        assert_eq!(ext, Profile::XRechnungExtension);
        assert!(ext.is_xrechnung());
        assert_eq!(ext.level(), level::EXTENDED);
    }

    #[test]
    fn peppol_by_specification_or_process() {
        assert_eq!(Profile::classify(PEPPOL_URN, None), Profile::Peppol);
        assert_eq!(
            Profile::classify(EN16931_URN, Some(PEPPOL_PROCESS_ID)),
            Profile::Peppol
        );
        // only a plain EN 16931 document is promoted
        assert_eq!(
            Profile::classify("urn:factur-x.eu:1p0:basicwl", Some(PEPPOL_PROCESS_ID)),
            Profile::BasicWl
        );
    }

    #[test]
    fn unknown_identifiers() {
        assert_eq!(Profile::classify("", None), Profile::Unknown);
        assert_eq!(Profile::classify("urn:example:custom", None), Profile::Unknown);
        assert_eq!(Profile::Unknown.level(), level::UNKNOWN);
    }

    #[test]
    fn classification_ignores_surrounding_whitespace() {
        assert_eq!(
            Profile::classify("  urn:cen.eu:en16931:2017\n", None),
            Profile::En16931
        );
    }

    #[test]
    fn canonical_urns_classify_to_themselves() {
        for profile in [
            Profile::Minimum,
            Profile::BasicWl,
            Profile::Basic,
            Profile::En16931,
            Profile::Peppol,
            Profile::XRechnung,
            Profile::XRechnungExtension,
            Profile::Extended,
        ] {
            assert_eq!(Profile::classify(profile.urn(), None), profile);
        }
    }
}
