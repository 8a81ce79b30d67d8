use gisaid_prep::labs::LabRuleSet;
use gisaid_prep::table::Table;

fn metadata(rows: &[(&str, &str)]) -> Table {
    Table::from_rows(
        vec!["country".to_string(), "submitting_lab".to_string()],
        rows.iter()
            .map(|(country, lab)| vec![country.to_string(), lab.to_string()])
            .collect(),
    )
    .unwrap()
}

#[test]
fn second_pass_changes_nothing() {
    let mut table = metadata(&[
        ("South Africa", "KRISP, KZn Research Innovation and Sequencing Platform"),
        ("South Africa", "Stellenbosch University and NHLS"),
        ("South Africa", "ZARV, Department Mdeical Virology, University of Pretoria"),
        ("Uganda", "Where sequence data have been generated and submitted to GISAID"),
        ("Nigeria", "Redeemer's University, ACEGID"),
        ("Nigeria", "National Reference Laboratory"),
        (
            "Democratic Republic of the Congo",
            "Pathogen Sequencing Lab, National Institute for Biomedical Research (INRB)",
        ),
        ("Kenya", "KEMRI-Wellcome Trust Research Programme,Kilifi"),
        ("Ghana", "Noguchi Memorial Institute for Medical Research"),
    ]);
    let rules = LabRuleSet::default();

    assert_eq!(rules.apply(&mut table).unwrap(), 8);
    let first = table.clone();
    assert_eq!(rules.apply(&mut table).unwrap(), 0);
    assert_eq!(table, first);
    assert_eq!(
        table.value(8, "submitting_lab"),
        Some("Noguchi Memorial Institute for Medical Research")
    );
}

#[test]
fn country_conditions_are_respected() {
    let mut table = metadata(&[
        ("Ghana", "National Public Health Reference Laboratory"),
        ("Nigeria", "National Public Health Reference Laboratory"),
    ]);
    LabRuleSet::default().apply(&mut table).unwrap();
    assert_eq!(
        table.column("submitting_lab").unwrap(),
        vec![
            "National Public Health Reference Laboratory",
            "NCDC, National Reference Laboratory, Nigeria Centre for Disease Control, Gaduwa, Abuja, Nigeria",
        ]
    );
}
