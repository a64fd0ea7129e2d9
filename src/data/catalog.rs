// ============================================================
// Layer 4 — Feature Catalog
// ============================================================
// Static lookup table: schema field name → {label, tooltip}.
// Used purely to render the form. The inference adapter never
// reads it — the column set comes from the artifact, not from
// here — so a field the artifact knows but this table doesn't
// still renders, just with its raw name as the label.
//
// Field descriptions follow the NASA Exoplanet Archive's
// Kepler Objects of Interest (KOI) column definitions.

/// Display metadata for one form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureInfo {
    pub name:    &'static str,
    pub label:   &'static str,
    pub tooltip: &'static str,
}

/// Columns whose values are category names rather than numbers
pub const CATEGORICAL_FEATURES: &[&str] = &["koi_tce_delivname"];

const PERIOD_TIP: &str = "The interval between consecutive planetary transits.";
const EPOCH_TIP: &str = "The time corresponding to the center of the first detected transit in \
    Barycentric Julian Day (BJD) minus a constant offset of 2,454,833.0 days. The offset \
    corresponds to 12:00 on Jan 1, 2009 UTC.";
const DURATION_TIP: &str = "The duration of the observed transits. Duration is measured from \
    first contact between the planet and star until last contact. Contact times are typically \
    computed from a best-fit model produced by a Mandel-Agol (2002) model fit to a multi-quarter \
    Kepler light curve, assuming a linear orbital ephemeris.";
const DEPTH_TIP: &str = "The fraction of stellar flux lost at the minimum of the planetary \
    transit. Transit depths are typically computed from a best-fit model produced by a \
    Mandel-Agol (2002) model fit to a multi-quarter Kepler light curve, assuming a linear \
    orbital ephemeris.";
const PRAD_TIP: &str = "The radius of the planet. Planetary radius is the product of the planet \
    star radius ratio and the stellar radius.";
const TEQ_TIP: &str = "Approximation for the temperature of the planet. The calculation of \
    equilibrium temperature assumes a) thermodynamic equilibrium between the incident stellar \
    flux and the radiated heat from the planet, b) a Bond albedo (the fraction of total power \
    incident upon the planet scattered back into space) of 0.3, c) the planet and star are \
    blackbodies, and d) the heat is evenly distributed between the day and night sides of the \
    planet.";
const INSOL_TIP: &str = "Insolation flux is another way to give the equilibrium temperature. It \
    depends on the stellar parameters (specifically the stellar radius and temperature), and on \
    the semi-major axis of the planet. It's given in units relative to those measured for the \
    Earth from the Sun.";
const STEFF_TIP: &str = "The photospheric temperature of the star.";

/// Every field the form knows how to describe, in display order
pub const FEATURE_INFO: &[FeatureInfo] = &[
    FeatureInfo {
        name:    "koi_tce_delivname",
        label:   "TCE Delivery Name",
        tooltip: "TCE delivery name corresponding to the TCE data federated to the KOI.",
    },
    FeatureInfo { name: "koi_period",        label: "Orbital Period (days)",                                tooltip: PERIOD_TIP },
    FeatureInfo { name: "koi_period_err1",   label: "Orbital Period Upper Uncertainty (days)",              tooltip: PERIOD_TIP },
    FeatureInfo { name: "koi_period_err2",   label: "Orbital Period Lower Uncertainty (days)",              tooltip: PERIOD_TIP },
    FeatureInfo { name: "koi_time0bk_err2",  label: "Transit Epoch Lower Uncertainty (BJD - 2,454,833.0)",  tooltip: EPOCH_TIP },
    FeatureInfo { name: "koi_duration_err1", label: "Transit Duration Upper Uncertainty (hours)",           tooltip: DURATION_TIP },
    FeatureInfo { name: "koi_duration_err2", label: "Transit Duration Lower Uncertainty (hours)",           tooltip: DURATION_TIP },
    FeatureInfo { name: "koi_depth",         label: "Transit Depth (parts per million)",                    tooltip: DEPTH_TIP },
    FeatureInfo { name: "koi_prad",          label: "Planetary Radius (Earth radii)",                       tooltip: PRAD_TIP },
    FeatureInfo { name: "koi_prad_err1",     label: "Planetary Radius Upper Uncertainty (Earth radii)",     tooltip: PRAD_TIP },
    FeatureInfo { name: "koi_prad_err2",     label: "Planetary Radius Lower Uncertainty (Earth radii)",     tooltip: PRAD_TIP },
    FeatureInfo { name: "koi_teq",           label: "Equilibrium Temperature (Kelvin)",                     tooltip: TEQ_TIP },
    FeatureInfo { name: "koi_insol",         label: "Insolation Flux [Earth flux]",                         tooltip: INSOL_TIP },
    FeatureInfo { name: "koi_insol_err1",    label: "Insolation Flux Upper Uncertainty [Earth flux]",       tooltip: INSOL_TIP },
    FeatureInfo { name: "koi_insol_err2",    label: "Insolation Flux Lower Uncertainty [Earth flux]",       tooltip: INSOL_TIP },
    FeatureInfo {
        name:    "koi_model_snr",
        label:   "Transit Signal-to-Noise",
        tooltip: "Transit depth normalized by the mean uncertainty in the flux during the transits.",
    },
    FeatureInfo { name: "koi_steff_err1",    label: "Stellar Effective Temperature Upper Uncertainty (Kelvin)", tooltip: STEFF_TIP },
    FeatureInfo { name: "koi_steff_err2",    label: "Stellar Effective Temperature Lower Uncertainty (Kelvin)", tooltip: STEFF_TIP },
];

/// Look up display metadata for a field
pub fn lookup(name: &str) -> Option<&'static FeatureInfo> {
    FEATURE_INFO.iter().find(|f| f.name == name)
}

/// Label for a field, falling back to the raw field name
pub fn label_for(name: &str) -> &str {
    match lookup(name) {
        Some(info) => info.label,
        None => name,
    }
}

/// Tooltip for a field, empty if the field isn't catalogued
pub fn tooltip_for(name: &str) -> &'static str {
    lookup(name).map(|f| f.tooltip).unwrap_or("")
}

/// The default categorical column list, owned
pub fn default_categorical() -> Vec<String> {
    CATEGORICAL_FEATURES.iter().map(|s| s.to_string()).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = FEATURE_INFO.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), FEATURE_INFO.len());
        assert_eq!(FEATURE_INFO.len(), 18);
    }

    #[test]
    fn test_categorical_fields_are_catalogued() {
        for name in CATEGORICAL_FEATURES {
            assert!(lookup(name).is_some(), "{name} missing from catalog");
        }
    }

    #[test]
    fn test_fallbacks_for_unknown_field() {
        assert_eq!(label_for("koi_mystery"), "koi_mystery");
        assert_eq!(tooltip_for("koi_mystery"), "");
        assert_eq!(label_for("koi_period"), "Orbital Period (days)");
    }
}
