use super::record;
use crate::config::SummaryConfig;
use crate::summarizer::normalize::default_gender_table;
use crate::summarizer::views::{age_bracket_counts, age_gender_pyramid, average, ranking_view};
use crate::summarizer::*;

fn gender_dataset() -> Dataset {
    Dataset::from_records(vec![
        record(Some("Feminino"), Some(19)),
        record(Some("feminino "), Some(23)),
        record(Some("MASCULINO"), Some(23)),
        record(Some("Feminino"), Some(36)),
        record(Some("masculino"), None),
        record(None, Some(27)),
    ])
}

#[test]
fn test_count_by_category_sums_to_record_count() {
    let dataset = gender_dataset();
    let counts = count_by_category(dataset.records(), Field::Gender, &default_gender_table());

    assert_eq!(counts.get("Feminino"), 3);
    assert_eq!(counts.get("Masculino"), 2);
    assert_eq!(counts.get(EMPTY_LABEL), 1);
    assert_eq!(counts.total(), 6);
    assert_eq!(counts.total() as usize, dataset.len());
}

#[test]
fn test_top_n_excludes_empty_and_is_bounded() {
    let agents = [
        "CIEE", "IEL", "ciee", "", "Nube", "IEL", "CIEE", "Abre", "Super Estágios", "Nube",
        "Mundo", "  ", "n/a",
    ];
    let records: Vec<Record> = agents
        .iter()
        .map(|a| Record {
            integration_agent: Some((*a).to_owned()),
            ..Record::default()
        })
        .collect();

    let top = top_n(
        &records,
        Field::IntegrationAgent,
        &NormalizationTable::passthrough(),
        5,
    );

    assert_eq!(top.len(), 5);
    assert!(top.iter().all(|e| !is_empty_label(&e.label)));
    assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    let labels: Vec<&str> = top.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["ciee", "iel", "nube", "abre", "super estágios"]);
}

#[test]
fn test_age_bracket_counts_in_order_with_zeros() -> crate::error::Result<()> {
    let table = BracketTable::new(default_brackets())?;
    let counts = age_bracket_counts(&gender_dataset(), &table)?;

    let pairs: Vec<(&str, u64)> = counts.iter().map(|c| (c.label.as_str(), c.count)).collect();
    assert_eq!(
        pairs,
        [
            ("-18 até 21", 1),
            ("22 até 25", 2),
            ("26 até 29", 1),
            ("30 até 34", 0),
            ("35 ou +", 1),
        ]
    );
    Ok(())
}

#[test]
fn test_age_view_fails_on_uncovered_age() -> crate::error::Result<()> {
    let table = BracketTable::new(default_brackets())?;
    let dataset = Dataset::from_records(vec![record(Some("Feminino"), Some(-4))]);
    let err = age_bracket_counts(&dataset, &table).unwrap_err();
    assert!(err.to_string().contains("-4"));
    Ok(())
}

#[test]
fn test_pyramid_skips_empty_gender_and_missing_age() -> crate::error::Result<()> {
    let table = BracketTable::new(default_brackets())?;
    let pyramid = age_gender_pyramid(&gender_dataset(), &table, &default_gender_table())?;

    assert_eq!(pyramid.genders, ["Feminino", "Masculino"]);
    assert_eq!(pyramid.rows.len(), 5);
    assert_eq!(pyramid.count("-18 até 21", "Feminino"), 1);
    assert_eq!(pyramid.count("22 até 25", "Feminino"), 1);
    assert_eq!(pyramid.count("22 até 25", "Masculino"), 1);
    assert_eq!(pyramid.count("35 ou +", "Feminino"), 1);
    assert_eq!(pyramid.count("26 até 29", "Feminino"), 0);
    let total: u64 = pyramid.rows.iter().flat_map(|r| r.counts.iter()).sum();
    assert_eq!(total, 4);
    Ok(())
}

#[test]
fn test_average_ignores_absent_values() -> crate::error::Result<()> {
    let dataset = Dataset::from_records(vec![
        Record {
            workload: Some("40h semanais".to_owned()),
            ..Record::default()
        },
        Record {
            workload: Some("variável".to_owned()),
            ..Record::default()
        },
        Record {
            workload: Some("20 horas".to_owned()),
            ..Record::default()
        },
    ]);
    assert_eq!(average(&dataset, Field::Workload)?, Some(30.0));
    assert_eq!(average(&dataset, Field::Age)?, None);
    Ok(())
}

#[test]
fn test_workload_ranking_has_no_cutoff() -> crate::error::Result<()> {
    let workloads = ["20h", "30h", "30h", "40h", "", "6h diárias", "30h"];
    let dataset = Dataset::from_records(
        workloads
            .iter()
            .map(|w| Record {
                workload: Some((*w).to_owned()),
                ..Record::default()
            })
            .collect(),
    );
    let table = NormalizationTable::passthrough();
    let ranking = ranking_view(&dataset, Field::Workload, &table, None)?;
    assert_eq!(ranking.len(), 4);
    assert_eq!(ranking[0].label, "30h");
    assert_eq!(ranking[0].count, 3);
    Ok(())
}

#[test]
fn test_report_is_idempotent() {
    let config = SummaryConfig::default();
    let dataset = gender_dataset();
    assert_eq!(
        build_report(&dataset, &config),
        build_report(&dataset, &config)
    );
}

#[test]
fn test_bad_brackets_fail_only_age_views() {
    let config = SummaryConfig {
        age_brackets: vec![AgeBracket::new("all", 5, None)],
        ..SummaryConfig::default()
    };
    let report = build_report(&gender_dataset(), &config);

    assert!(!report.age_brackets.is_ready());
    assert!(!report.age_gender_pyramid.is_ready());
    assert!(report.gender.is_ready());
    assert!(report.averages.age.is_ready());
    let failed: Vec<&str> = report.failures().iter().map(|(name, _)| *name).collect();
    assert_eq!(failed, ["age_brackets", "age_gender_pyramid"]);
}
