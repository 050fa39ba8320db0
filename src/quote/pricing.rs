//! Pricing rules: cost aggregation, contractor markup, VAT, rounding.
//!
//! Markup and VAT rates are fixed business rules, not configuration.

use super::types::Material;

/// Contractor markup applied to aggregated material cost.
const CONTRACTOR_MARKUP: f64 = 0.25;

/// VAT rate for renovation work.
const VAT_RENOVATION: f64 = 0.10;

/// VAT rate for new construction.
const VAT_NEW_BUILD: f64 = 0.20;

/// Kind of project, selecting the applicable VAT rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Renovation,
    NewBuild,
}

impl ProjectKind {
    /// Map the extraction flag onto a project kind.
    pub fn from_renovation_flag(is_renovation: bool) -> Self {
        if is_renovation {
            Self::Renovation
        } else {
            Self::NewBuild
        }
    }

    pub fn vat_rate(&self) -> f64 {
        match self {
            Self::Renovation => VAT_RENOVATION,
            Self::NewBuild => VAT_NEW_BUILD,
        }
    }
}

/// Final customer-facing price for a task, in whole currency units.
///
/// Unresolved materials contribute exactly zero to the cost sum; their count
/// is reflected in the confidence score instead.
pub fn margin_protected_price(materials: &[Material], kind: ProjectKind) -> i64 {
    let cost: f64 = materials
        .iter()
        .map(|m| m.unit_price.resolved().unwrap_or(0.0) * m.quantity)
        .sum();

    let marked_up = cost * (1.0 + CONTRACTOR_MARKUP);
    let with_vat = marked_up * (1.0 + kind.vat_rate());

    with_vat.round().max(0.0) as i64
}

/// Human-readable duration from estimated hours.
///
/// Up to a working day is reported in hours; anything longer rounds up to
/// whole eight-hour days.
pub fn format_duration(hours: f64) -> String {
    if hours <= 8.0 {
        let plural = if hours == 1.0 { "" } else { "s" };
        if hours.fract() == 0.0 {
            format!("{} hour{}", hours as i64, plural)
        } else {
            format!("{} hour{}", hours, plural)
        }
    } else {
        let days = (hours / 8.0).ceil() as i64;
        let plural = if days == 1 { "" } else { "s" };
        format!("{} day{}", days, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::types::UnitPrice;

    fn material(name: &str, quantity: f64, unit_price: UnitPrice) -> Material {
        Material {
            name: name.to_string(),
            quantity,
            unit: "m2".to_string(),
            unit_price,
        }
    }

    #[test]
    fn test_renovation_pricing_with_markup_and_vat() {
        // 10 m2 of tile at 20/unit: 200 base, 250 after markup, 275 with 10% VAT
        let materials = vec![material("tile", 10.0, UnitPrice::Resolved(20.0))];
        assert_eq!(
            margin_protected_price(&materials, ProjectKind::Renovation),
            275
        );
    }

    #[test]
    fn test_new_build_vat_rate() {
        let materials = vec![material("tile", 10.0, UnitPrice::Resolved(20.0))];
        // 250 after markup, 300 with 20% VAT
        assert_eq!(margin_protected_price(&materials, ProjectKind::NewBuild), 300);
    }

    #[test]
    fn test_unresolved_materials_contribute_zero() {
        let materials = vec![
            material("tile", 10.0, UnitPrice::Resolved(20.0)),
            material("mystery grout", 5.0, UnitPrice::Unresolved),
        ];
        assert_eq!(
            margin_protected_price(&materials, ProjectKind::Renovation),
            275
        );
    }

    #[test]
    fn test_price_is_non_negative() {
        assert_eq!(margin_protected_price(&[], ProjectKind::Renovation), 0);

        let materials = vec![material("only unresolved", 3.0, UnitPrice::Unresolved)];
        assert_eq!(margin_protected_price(&materials, ProjectKind::NewBuild), 0);
    }

    #[test]
    fn test_rounding_to_whole_units() {
        // 1 * 1.01 = 1.01, * 1.25 = 1.2625, * 1.1 = 1.38875 -> 1
        let materials = vec![material("washer", 1.0, UnitPrice::Resolved(1.01))];
        assert_eq!(margin_protected_price(&materials, ProjectKind::Renovation), 1);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(1.0), "1 hour");
        assert_eq!(format_duration(6.0), "6 hours");
        assert_eq!(format_duration(6.5), "6.5 hours");
        assert_eq!(format_duration(8.0), "8 hours");
        assert_eq!(format_duration(9.0), "2 days");
        assert_eq!(format_duration(16.0), "2 days");
        assert_eq!(format_duration(17.0), "3 days");
    }
}
