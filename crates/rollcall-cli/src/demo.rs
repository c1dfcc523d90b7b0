//! Demonstration data: a small roster and simulated attendance.

use std::io::{self, Write};

use anyhow::{Context, Result};
use rand::Rng;
use tracing::{debug, warn};

use rollcall_core::utils::format_date_long;
use rollcall_core::{Person, Registry};

/// Ids seeded by `seed_roster`, in marking order
pub const DEMO_IDS: [&str; 6] = ["S001", "S002", "S003", "T001", "T002", "T003"];

/// Chance that anyone is present on a given simulated day
const PRESENCE_PROBABILITY: f64 = 0.8;

pub fn seed_roster(registry: &mut Registry) -> Result<()> {
    let students = [
        ("Alice Johnson", "S001", "Grade 10", 3.8, &["Mathematics", "Physics", "Chemistry"][..]),
        ("Bob Smith", "S002", "Grade 11", 3.2, &["English", "History", "Biology"][..]),
        ("Carol Davis", "S003", "Grade 9", 3.9, &["Art", "Music"][..]),
    ];
    for (name, id, grade, gpa, subjects) in students {
        let mut person = Person::student(name, id, grade, gpa)
            .with_context(|| format!("Failed to create demo student {}", id))?;
        if let Some(student) = person.as_student_mut() {
            for subject in subjects {
                student.add_subject(subject);
            }
        }
        registry.register(person)?;
    }

    let teachers = [
        ("Dr. Sarah Wilson", "T001", "Mathematics", 8, 75_000.0, ["PhD in Mathematics", "Teaching Certification"]),
        ("Mr. John Davis", "T002", "Physics", 5, 58_000.0, ["MSc Physics", "Science Education Diploma"]),
        ("Ms. Emily Brown", "T003", "English", 12, 82_000.0, ["MA English Literature", "TESOL Certification"]),
    ];
    for (name, id, subject, years, salary, qualifications) in teachers {
        let mut person = Person::teacher(name, id, subject, years, salary)
            .with_context(|| format!("Failed to create demo teacher {}", id))?;
        if let Some(teacher) = person.as_teacher_mut() {
            for qualification in qualifications {
                teacher.add_qualification(qualification);
            }
        }
        registry.register(person)?;
    }

    debug!(count = registry.len(), "Demo roster seeded");
    Ok(())
}

/// Whether a demo person is present on the given day index.
/// S002 stops attending after the first week and T002 misses day 3.
fn scripted_presence(id: &str, day_index: usize, roll: bool) -> bool {
    match id {
        "S002" if day_index > 6 => false,
        "T002" if day_index == 3 => false,
        _ => roll,
    }
}

/// Mark every demo person on every school day, writing progress to `progress`.
pub fn simulate_attendance<R: Rng, W: Write>(
    registry: &mut Registry,
    rng: &mut R,
    progress: &mut W,
) -> io::Result<()> {
    let days = registry.school_days().to_vec();
    for (day_index, day) in days.into_iter().enumerate() {
        writeln!(progress, "Marking attendance for {}", format_date_long(day))?;
        for id in DEMO_IDS {
            let present = scripted_presence(id, day_index, rng.gen_bool(PRESENCE_PROBABILITY));
            match registry.mark_attendance(id, day, present) {
                Ok(Some(notification)) => writeln!(progress, "  {}: {}", id, notification)?,
                Ok(None) => {}
                Err(e) => warn!(id = %id, error = %e, "Error marking attendance"),
            }
        }
    }
    progress.flush()
}
