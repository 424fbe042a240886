//! Sample data: seeded rosters, parent statistics, administrator metrics.
//! Everything the dashboards show comes from here; nothing is queried.

use crate::model::{
    AttendanceEntry, AttendanceStatus, AttendanceSummary, Mark, Period, RosterRow, StudentProfile,
};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::Serialize;

pub const MAX_ENTRIES: usize = 20;

const SUBJECTS: [&str; 5] = [
    "Programación Orientada a Objetos",
    "Base de Datos",
    "Desarrollo Web",
    "Matemáticas",
    "Inglés",
];

const INSTRUCTORS: [&str; 4] = [
    "Prof. Juan Martínez",
    "Prof. Ana López",
    "Prof. Carlos García",
    "Prof. María Rodríguez",
];

pub const PROGRAMS: [&str; 4] = ["tidsm", "sistemas", "web", "otra"];

const ROSTER_DATE: &str = "2024-01-15";

pub const DEFAULT_INSTITUTIONAL_ID: &str = "2023040156";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependent {
    pub id: &'static str,
    pub name: &'static str,
}

pub static DEPENDENTS: [Dependent; 2] = [
    Dependent {
        id: "maria",
        name: "María González Hernández",
    },
    Dependent {
        id: "jose",
        name: "José González Hernández",
    },
];

pub fn dependent(id: &str) -> Option<&'static Dependent> {
    DEPENDENTS.iter().find(|d| d.id == id)
}

pub fn default_profile() -> StudentProfile {
    StudentProfile {
        name: "María González Hernández".into(),
        program: "Ingeniería en Sistemas Computacionales".into(),
        institutional_id: DEFAULT_INSTITUTIONAL_ID.into(),
    }
}

/// Seed roster for a program, `None` for programs without a table.
pub fn roster(program: &str) -> Option<Vec<RosterRow>> {
    use Mark::{Blank as B, Checked as C};
    let rows: &[(&str, Mark, Mark, Mark)] = match program {
        "tidsm" => &[
            ("Eddel Jonathan Perez", B, B, B),
            ("Karen Yanitzey Hernandez", C, B, B),
            ("Adilene Monserrat", B, C, B),
            ("Fidel Alexis Gonzalez Mazon", B, B, C),
        ],
        "sistemas" => &[
            ("María González López", C, B, B),
            ("Carlos Rodríguez Pérez", C, B, B),
            ("Ana Martínez Silva", B, C, B),
            ("Luis Fernando Torres", C, B, B),
        ],
        "web" => &[
            ("Pedro Ramírez Vega", B, B, C),
            ("Sofía Hernández Cruz", C, B, B),
            ("Diego Morales Castro", C, B, B),
            ("Isabella Ruiz Mendoza", B, C, B),
        ],
        "otra" => &[
            ("Alejandro Jiménez Flores", C, B, B),
            ("Valeria Sánchez Ortega", B, C, B),
            ("Roberto García Díaz", C, B, B),
        ],
        _ => return None,
    };
    Some(
        rows.iter()
            .map(|&(name, present, absent, late)| RosterRow {
                name: name.to_string(),
                present,
                absent,
                late,
                date: ROSTER_DATE.to_string(),
            })
            .collect(),
    )
}

/// Present/absent/late for one period. Each count is a per-week draw scaled
/// by the period multiplier, so two calls fed the same random stream differ
/// exactly by the ratio of their multipliers.
pub fn dependent_counts<R: Rng + ?Sized>(rng: &mut R, period: Period) -> (u32, u32, u32) {
    let m = period.multiplier();
    let present = rng.gen_range(15..25) * m;
    let absent = rng.gen_range(1..4) * m;
    let late = rng.gen_range(1..3) * m;
    (present, absent, late)
}

pub fn percentage(present: u32, absent: u32, late: u32) -> u32 {
    let total = present + absent + late;
    if total == 0 {
        return 0;
    }
    (present as f64 / total as f64 * 100.0).round() as u32
}

/// Up to `MAX_ENTRIES` entries, one per day going back from `today`.
pub fn entries<R: Rng + ?Sized>(rng: &mut R, count: u32, today: NaiveDate) -> Vec<AttendanceEntry> {
    let n = (count as usize).min(MAX_ENTRIES);
    (0..n)
        .map(|i| {
            let date = today - Duration::days(i as i64);
            let status = AttendanceStatus::ALL[rng.gen_range(0..AttendanceStatus::ALL.len())];
            AttendanceEntry {
                date: date.format("%Y-%m-%d").to_string(),
                time: format!("{:02}:{:02}", rng.gen_range(7..11), rng.gen_range(0..60)),
                subject: SUBJECTS[rng.gen_range(0..SUBJECTS.len())].to_string(),
                instructor: INSTRUCTORS[rng.gen_range(0..INSTRUCTORS.len())].to_string(),
                status,
                status_label: status.label().to_string(),
            }
        })
        .collect()
}

pub fn dependent_summary<R: Rng + ?Sized>(
    rng: &mut R,
    period: Period,
    today: NaiveDate,
) -> AttendanceSummary {
    let (present, absent, late) = dependent_counts(rng, period);
    AttendanceSummary {
        present,
        absent,
        late,
        percentage: percentage(present, absent, late),
        entries: entries(rng, present + absent + late, today),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMetrics {
    pub total_students: u32,
    pub total_teachers: u32,
    pub total_programs: u32,
    pub total_present: u32,
    pub total_absent: u32,
    pub total_late: u32,
    pub average_attendance: f64,
}

pub fn admin_metrics() -> AdminMetrics {
    AdminMetrics {
        total_students: 245,
        total_teachers: 28,
        total_programs: 4,
        total_present: 1847,
        total_absent: 203,
        total_late: 127,
        average_attendance: 84.8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn month_is_four_weeks_on_the_same_stream() {
        for seed in 0..50 {
            let week = dependent_counts(&mut StdRng::seed_from_u64(seed), Period::Week);
            let month = dependent_counts(&mut StdRng::seed_from_u64(seed), Period::Month);
            assert_eq!(month, (week.0 * 4, week.1 * 4, week.2 * 4));
            assert!((15..25).contains(&week.0));
            assert!((1..4).contains(&week.1));
            assert!((1..3).contains(&week.2));
        }
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(20, 2, 1), 87);
        assert_eq!(percentage(1, 1, 0), 50);
        assert_eq!(percentage(0, 0, 0), 0);
    }

    #[test]
    fn entries_are_capped_and_reverse_chronological() {
        let mut rng = StdRng::seed_from_u64(3);
        let list = entries(&mut rng, 64, day());
        assert_eq!(list.len(), MAX_ENTRIES);
        assert_eq!(list[0].date, "2024-03-01");
        assert_eq!(list[1].date, "2024-02-29");
        assert!(list.windows(2).all(|w| w[0].date > w[1].date));
        for e in &list {
            assert_eq!(e.status_label, e.status.label());
            let hour: u32 = e.time[..2].parse().unwrap();
            assert!((7..=10).contains(&hour));
        }
        assert_eq!(entries(&mut rng, 3, day()).len(), 3);
    }

    #[test]
    fn status_labels_are_spanish() {
        let labels: Vec<_> = AttendanceStatus::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["Presente", "Ausente", "Retardo"]);
    }

    #[test]
    fn summary_percentage_matches_counts() {
        let s = dependent_summary(&mut StdRng::seed_from_u64(11), Period::Semester, day());
        assert_eq!(s.percentage, percentage(s.present, s.absent, s.late));
        assert_eq!(s.entries.len(), MAX_ENTRIES);
    }

    #[test]
    fn every_program_has_a_roster() {
        for p in PROGRAMS {
            assert!(!roster(p).unwrap().is_empty());
        }
        assert!(roster("quimica").is_none());
        assert_eq!(roster("otra").unwrap().len(), 3);
    }
}
