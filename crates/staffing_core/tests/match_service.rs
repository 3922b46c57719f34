use staffing_core::db::open_db_in_memory;
use staffing_core::{
    Communication, MatchService, Potential, Process, ProcessCatalog, SqliteProcessCatalog,
};

#[test]
fn best_match_prefers_exact_and_falls_back_to_potential() {
    let conn = open_db_in_memory().unwrap();
    let catalog = SqliteProcessCatalog::new(&conn);
    catalog
        .replace_all(&[
            Process::new("A", Potential::Sales, Communication::Excellent, 3),
            Process::new("B", Potential::Sales, Communication::Good, 1),
        ])
        .unwrap();

    let service = MatchService::new(SqliteProcessCatalog::new(&conn));
    let best = service
        .find_best_match(Potential::Sales, Communication::Good)
        .unwrap()
        .unwrap();
    assert_eq!(best.name, "B");

    catalog
        .replace_all(&[Process::new(
            "A",
            Potential::Sales,
            Communication::Excellent,
            3,
        )])
        .unwrap();
    let fallback = service
        .find_best_match(Potential::Sales, Communication::Good)
        .unwrap()
        .unwrap();
    assert_eq!(fallback.name, "A");
}

#[test]
fn best_match_is_none_when_nothing_has_vacancy() {
    let conn = open_db_in_memory().unwrap();
    SqliteProcessCatalog::new(&conn)
        .replace_all(&[
            Process::new("Empty", Potential::Sales, Communication::Good, 0),
            Process::new("Other", Potential::Service, Communication::Good, 4),
        ])
        .unwrap();

    let service = MatchService::new(SqliteProcessCatalog::new(&conn));
    assert!(service
        .find_best_match(Potential::Sales, Communication::Good)
        .unwrap()
        .is_none());
}

#[test]
fn suggestions_rank_relevance_before_vacancy() {
    let conn = open_db_in_memory().unwrap();
    SqliteProcessCatalog::new(&conn)
        .replace_all(&[
            Process::new("CommOnly", Potential::Consultation, Communication::VeryGood, 20),
            Process::new("Exact", Potential::Service, Communication::VeryGood, 1),
            Process::new("PotentialOnly", Potential::Service, Communication::Good, 6),
            Process::new("Unrelated", Potential::Sales, Communication::Excellent, 50),
        ])
        .unwrap();

    let service = MatchService::new(SqliteProcessCatalog::new(&conn));
    let ranked = service
        .rank_suggestions(Potential::Service, Communication::VeryGood)
        .unwrap();
    let names: Vec<&str> = ranked.iter().map(|s| s.process.name.as_str()).collect();
    assert_eq!(names, vec!["Exact", "PotentialOnly", "CommOnly"]);

    let exact = service
        .exact_matches(Potential::Service, Communication::VeryGood)
        .unwrap();
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].name, "Exact");
}
