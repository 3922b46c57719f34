//! Property tests for vacancy bookkeeping across random ledger sequences.

use proptest::collection::vec;
use proptest::prelude::*;
use rusqlite::Connection;
use staffing_core::db::open_db_in_memory;
use staffing_core::{
    normalize_email, AssignmentLedger, Communication, Employee, EmployeeDraft,
    EmployeeRepository, Potential, Process, ProcessCatalog, SqliteAssignmentStore,
    SqliteEmployeeRepository, SqliteProcessCatalog,
};
use std::collections::{BTreeMap, HashSet};

const PROCESS_NAMES: [&str; 3] = ["North", "South", "West"];
const EMAILS: [&str; 5] = [
    "ada@example.org",
    "Ada@Example.org",
    "grace@example.org",
    "linus@example.org",
    " LINUS@example.org ",
];

#[derive(Debug, Clone)]
enum Op {
    Add { email: usize, process: Option<usize> },
    AutoAdd { email: usize },
    Update { target: usize, email: usize, process: Option<usize> },
    Delete { target: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..EMAILS.len(), proptest::option::of(0..PROCESS_NAMES.len() + 1))
            .prop_map(|(email, process)| Op::Add { email, process }),
        (0..EMAILS.len()).prop_map(|email| Op::AutoAdd { email }),
        (
            0usize..8,
            0..EMAILS.len(),
            proptest::option::of(0..PROCESS_NAMES.len() + 1)
        )
            .prop_map(|(target, email, process)| Op::Update {
                target,
                email,
                process
            }),
        (0usize..8).prop_map(|target| Op::Delete { target }),
    ]
}

/// Index `PROCESS_NAMES.len()` maps to a process missing from the catalog.
fn process_name(index: usize) -> String {
    PROCESS_NAMES
        .get(index)
        .map(|name| name.to_string())
        .unwrap_or_else(|| "Missing".to_string())
}

fn draft(email: usize, process: Option<usize>) -> EmployeeDraft {
    let mut draft = EmployeeDraft::new(
        "Someone",
        EMAILS[email],
        Potential::Sales,
        Communication::Good,
    );
    draft.process_name = process.map(process_name);
    draft
}

fn seed(vacancies: &[i64]) -> (Connection, BTreeMap<String, i64>) {
    let conn = open_db_in_memory().unwrap();
    let processes: Vec<Process> = PROCESS_NAMES
        .iter()
        .zip(vacancies)
        .map(|(name, vacancy)| Process::new(*name, Potential::Sales, Communication::Good, *vacancy))
        .collect();
    SqliteProcessCatalog::new(&conn)
        .replace_all(&processes)
        .unwrap();
    let initial = processes
        .into_iter()
        .map(|process| (process.name, process.vacancy))
        .collect();
    (conn, initial)
}

fn snapshot(conn: &Connection) -> (BTreeMap<String, i64>, Vec<Employee>) {
    let vacancies = SqliteProcessCatalog::new(conn)
        .list_processes()
        .unwrap()
        .into_iter()
        .map(|process| (process.name, process.vacancy))
        .collect();
    let mut employees = SqliteEmployeeRepository::new(conn)
        .list_employees()
        .unwrap();
    employees.sort_by_key(|employee| employee.id);
    (vacancies, employees)
}

fn pick(employees: &[Employee], target: usize) -> Option<&Employee> {
    if employees.is_empty() {
        None
    } else {
        employees.get(target % employees.len())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Vacancy never goes negative, consumed slots match bound employees,
    /// emails stay unique, and rejected operations change nothing.
    #[test]
    fn ledger_preserves_vacancy_invariants(
        vacancies in vec(0i64..3, PROCESS_NAMES.len()),
        ops in vec(op_strategy(), 1..40),
    ) {
        let (conn, initial) = seed(&vacancies);
        let ledger = AssignmentLedger::new(SqliteAssignmentStore::new(&conn));

        for op in ops {
            let before = snapshot(&conn);
            let succeeded = match op {
                Op::Add { email, process } => ledger.add_employee(&draft(email, process)).is_ok(),
                Op::AutoAdd { email } => ledger.add_employee_best_match(&draft(email, None)).is_ok(),
                Op::Update { target, email, process } => match pick(&before.1, target) {
                    Some(employee) => ledger
                        .update_employee(employee.id, &draft(email, process))
                        .is_ok(),
                    None => false,
                },
                Op::Delete { target } => match pick(&before.1, target) {
                    Some(employee) => ledger.delete_employee(employee.id).is_ok(),
                    None => false,
                },
            };
            let after = snapshot(&conn);

            if !succeeded {
                prop_assert_eq!(&before, &after);
            }

            let (current, employees) = after;
            for (name, vacancy) in &current {
                prop_assert!(*vacancy >= 0);
                let held = employees
                    .iter()
                    .filter(|employee| employee.assigned_process.as_deref() == Some(name.as_str()))
                    .count() as i64;
                prop_assert_eq!(initial[name] - vacancy, held);
            }

            let mut emails = HashSet::new();
            for employee in &employees {
                prop_assert!(emails.insert(normalize_email(&employee.email)));
            }
        }
    }

    /// Arbitrary vacancy adjustments never produce a negative vacancy.
    #[test]
    fn adjust_vacancy_never_goes_negative(
        start in 0i64..5,
        deltas in vec(-8i64..8, 1..30),
    ) {
        let (conn, _) = seed(&[start, start, start]);
        let catalog = SqliteProcessCatalog::new(&conn);
        let mut expected = start;

        for delta in deltas {
            catalog.adjust_vacancy("North", delta).unwrap();
            expected = (expected + delta).max(0);
            let vacancy = catalog.get_process("North").unwrap().unwrap().vacancy;
            prop_assert!(vacancy >= 0);
            prop_assert_eq!(vacancy, expected);
        }
    }
}
