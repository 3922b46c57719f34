use staffing_core::db::open_db;
use staffing_core::{
    AssignmentLedger, Communication, EmployeeDraft, EmployeeRepository, LedgerError, Potential,
    Process, ProcessCatalog, SqliteAssignmentStore, SqliteEmployeeRepository,
    SqliteProcessCatalog,
};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn competing_writers_cannot_both_take_the_last_slot() {
    const WRITERS: usize = 4;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("race.sqlite3");
    let setup = open_db(&path).unwrap();
    SqliteProcessCatalog::new(&setup)
        .replace_all(&[Process::new("Last", Potential::Sales, Communication::Good, 1)])
        .unwrap();

    let connections: Vec<_> = (0..WRITERS).map(|_| open_db(&path).unwrap()).collect();
    let barrier = Arc::new(Barrier::new(WRITERS));
    let handles: Vec<_> = connections
        .into_iter()
        .enumerate()
        .map(|(index, conn)| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let ledger = AssignmentLedger::new(SqliteAssignmentStore::new(&conn));
                let draft = EmployeeDraft::new(
                    format!("Writer {index}"),
                    format!("writer{index}@example.org"),
                    Potential::Sales,
                    Communication::Good,
                )
                .with_process("Last");
                barrier.wait();
                ledger.add_employee(&draft).map(|_| ())
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let winners = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(winners, 1);
    assert!(results
        .iter()
        .filter_map(|result| result.as_ref().err())
        .all(|err| matches!(err, LedgerError::NoVacancy(_))));

    let process = SqliteProcessCatalog::new(&setup)
        .get_process("Last")
        .unwrap()
        .unwrap();
    assert_eq!(process.vacancy, 0);
    let assigned = SqliteEmployeeRepository::new(&setup)
        .list_employees()
        .unwrap()
        .len();
    assert_eq!(assigned, 1);
}
