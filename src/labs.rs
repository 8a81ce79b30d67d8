//! Canonical spellings for submitting laboratories.
//!
//! GISAID submitters type their lab names by hand, so the same lab shows up
//! under several spellings. [`LabRuleSet`] rewrites the known variants to one
//! canonical string per lab.

use crate::error::PrepError;
use crate::table::Table;

const KRISP: &str = "KRISP, KZN Research Innovation and Sequencing Platform";
const CERI: &str = "CERI, Centre for Epidemic Response and Innovation";
const NHLS_UCT: &str = "NHLS/UCT";
const NHLS_TYGERBERG: &str =
    "Division of Medical Virology, Stellenbosch University and NHLS Tygerberg Hospital";
const ZARV: &str = "ZARV, Department Medical Virology, University of Pretoria";
const UVRI: &str = "MRC/UVRI & LSHTM Uganda Research Unit";
const KEMRI: &str = "KEMRI-Wellcome Trust Research Programme/KEMRI-CGMR-C Kilifi";
const ACEGID: &str = "ACEGID, African Centre of Excellence for Genomics of Infectious Diseases, Redeemer’s University, Ede";
const NCDC: &str = "NCDC, National Reference Laboratory, Nigeria Centre for Disease Control, Gaduwa, Abuja, Nigeria";
const INRB: &str = "INRB, Pathogen Sequencing Lab, National Institute for Biomedical Research";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabMatch {
    Exact(&'static str),
    AnyOf(&'static [&'static str]),
    PrefixInCountry {
        country: &'static str,
        prefix: &'static str,
    },
    ExactInCountry {
        country: &'static str,
        name: &'static str,
    },
}

impl LabMatch {
    pub fn matches(&self, lab: &str, country: &str) -> bool {
        match self {
            LabMatch::Exact(name) => lab == *name,
            LabMatch::AnyOf(names) => names.contains(&lab),
            LabMatch::PrefixInCountry {
                country: wanted,
                prefix,
            } => country == *wanted && lab.starts_with(prefix),
            LabMatch::ExactInCountry {
                country: wanted,
                name,
            } => country == *wanted && lab == *name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabRule {
    pub condition: LabMatch,
    pub canonical: &'static str,
}

const fn rule(condition: LabMatch, canonical: &'static str) -> LabRule {
    LabRule {
        condition,
        canonical,
    }
}

const DEFAULT_RULES: &[LabRule] = &[
    rule(
        LabMatch::Exact("KRISP, KZn Research Innovation and Sequencing Platform"),
        KRISP,
    ),
    rule(
        LabMatch::AnyOf(&[
            "CERI, Centre for Epidemic Response and Innvoation, Stellenbosch University and KRISP, KZN Research Innovation and Sequencing Platform, UKZN.",
            "CERI, Centre for Epidemic Response and Innovation, Stellenbosch Univeristy & KRISP, KZN Research Innovation and Sequencing Platform",
            "CERI, Centre for Epidemic Response and Innovation, Stellenbosch University and CERI-KRISP, KZN Research Innovation and Sequencing Platform",
        ]),
        CERI,
    ),
    rule(
        LabMatch::AnyOf(&[
            "National Health Laboratory Service/University of Cape Town (National Health Laboratory Service/University of Cape Town (NHLS/UCT))",
            "National Health Laboratory Service/University of Cape Town (NHLS/UCT)",
            "National Health Laboratory Service/UCT",
        ]),
        NHLS_UCT,
    ),
    rule(
        LabMatch::AnyOf(&[
            "National Health Laboratory Service (NHLS), Tygerberg",
            "Division of Medical Virology, Stellenbosch University and National Health Laboratory Service (NHLS)",
            "Division of Medical Virology, National Health Laboratory Service (NHLS), Tygerberg Hospital / Stellenbosch University",
            "Stellenbosch University and NHLS",
            "National Health Laboratory Services, Virology",
        ]),
        NHLS_TYGERBERG,
    ),
    rule(
        LabMatch::Exact("ZARV, Department Mdeical Virology, University of Pretoria"),
        ZARV,
    ),
    rule(
        LabMatch::Exact("Where sequence data have been generated and submitted to GISAID"),
        UVRI,
    ),
    rule(
        LabMatch::Exact("KEMRI-Wellcome Trust Research Programme,Kilifi"),
        KEMRI,
    ),
    rule(
        LabMatch::PrefixInCountry {
            country: "Nigeria",
            prefix: "African Centre of Excellence for Genomics of Infectious Diseases",
        },
        ACEGID,
    ),
    rule(LabMatch::Exact("Redeemer's University, ACEGID"), ACEGID),
    rule(
        LabMatch::PrefixInCountry {
            country: "Nigeria",
            prefix: "National",
        },
        NCDC,
    ),
    rule(
        LabMatch::ExactInCountry {
            country: "Democratic Republic of the Congo",
            name: "Pathogen Sequencing Lab, National Institute for Biomedical Research (INRB)",
        },
        INRB,
    ),
];

/// Ordered substitution rules. Each row is run through every rule in turn, so
/// a rule sees the value written by the rules before it.
#[derive(Debug, Clone)]
pub struct LabRuleSet {
    rules: Vec<LabRule>,
}

impl Default for LabRuleSet {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec())
    }
}

impl LabRuleSet {
    pub fn new(rules: Vec<LabRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[LabRule] {
        &self.rules
    }

    pub fn normalize(&self, lab: &str, country: &str) -> String {
        let mut current = lab;
        for rule in &self.rules {
            if rule.condition.matches(current, country) {
                current = rule.canonical;
            }
        }
        current.to_string()
    }

    /// Rewrites `submitting_lab` in place; returns the number of changed cells.
    pub fn apply(&self, table: &mut Table) -> Result<usize, PrepError> {
        let lab_idx = table.column_index("submitting_lab")?;
        let country_idx = table.column_index("country")?;
        let mut changed = 0usize;
        for row in 0..table.len() {
            let (lab, country) = {
                let cells = &table.rows()[row];
                (cells[lab_idx].as_str(), cells[country_idx].as_str())
            };
            let normalized = self.normalize(lab, country);
            if normalized != lab {
                table.set_value(row, lab_idx, normalized);
                changed += 1;
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_set_rules() {
        let rules = LabRuleSet::default();
        assert_eq!(
            rules.normalize("KRISP, KZn Research Innovation and Sequencing Platform", "South Africa"),
            KRISP
        );
        assert_eq!(
            rules.normalize("National Health Laboratory Service/UCT", "South Africa"),
            NHLS_UCT
        );
        assert_eq!(rules.normalize("Some Other Lab", "Kenya"), "Some Other Lab");
    }

    #[test]
    fn prefix_rules_depend_on_country() {
        let rules = LabRuleSet::default();
        assert_eq!(
            rules.normalize("National Virology Lab", "Nigeria"),
            NCDC
        );
        assert_eq!(
            rules.normalize("National Virology Lab", "Ghana"),
            "National Virology Lab"
        );
        assert_eq!(
            rules.normalize(
                "African Centre of Excellence for Genomics of Infectious Diseases (ACEGID)",
                "Nigeria"
            ),
            ACEGID
        );
    }

    #[test]
    fn country_scoped_exact_rule() {
        let rules = LabRuleSet::default();
        let lab = "Pathogen Sequencing Lab, National Institute for Biomedical Research (INRB)";
        assert_eq!(
            rules.normalize(lab, "Democratic Republic of the Congo"),
            INRB
        );
        assert_eq!(rules.normalize(lab, "Republic of the Congo"), lab);
    }

    #[test]
    fn later_rule_wins() {
        let rules = LabRuleSet::new(vec![
            rule(LabMatch::Exact("a"), "b"),
            rule(LabMatch::Exact("b"), "c"),
        ]);
        assert_eq!(rules.normalize("a", "X"), "c");
    }

    #[test]
    fn canonical_names_are_fixed_points() {
        let rules = LabRuleSet::default();
        for country in ["Nigeria", "Democratic Republic of the Congo", "South Africa"] {
            for canonical in rules.rules().iter().map(|rule| rule.canonical) {
                assert_eq!(rules.normalize(canonical, country), canonical);
            }
        }
    }
}
