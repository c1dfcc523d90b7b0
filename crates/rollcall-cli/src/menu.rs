//! Interactive menu loop.

use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use rollcall_core::utils::{format_date, format_percent, rule};
use rollcall_core::{Person, Registry, ReportingEngine};

/// Ids used by the escalation demonstration
const ESCALATION_DEMO_IDS: [&str; 2] = ["S001", "T001"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Report,
    Issues,
    Escalations,
    ErrorHandling,
    Summary,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Report),
            "2" => Some(MenuChoice::Issues),
            "3" => Some(MenuChoice::Escalations),
            "4" => Some(MenuChoice::ErrorHandling),
            "5" => Some(MenuChoice::Summary),
            "0" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

pub struct Session {
    pub registry: Registry,
    pub engine: ReportingEngine,
    pub issue_threshold_pct: f64,
    pub today: NaiveDate,
}

impl Session {
    /// Run the menu until the user exits or input ends.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        loop {
            print_menu(out)?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                debug!("Input closed, leaving menu");
                return Ok(());
            }

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Exit) => {
                    writeln!(out, "Thank you for using the Attendance System!")?;
                    return Ok(());
                }
                Some(choice) => self.dispatch(choice, out)?,
                None => writeln!(out, "Invalid choice. Please try again.")?,
            }

            writeln!(out, "\nPress Enter to continue...")?;
            out.flush()?;
            let mut pause = String::new();
            if input.read_line(&mut pause)? == 0 {
                return Ok(());
            }
        }
    }

    fn dispatch<W: Write>(&mut self, choice: MenuChoice, out: &mut W) -> Result<()> {
        match choice {
            MenuChoice::Report => {
                let report = self.engine.comprehensive_report(&mut self.registry);
                write!(out, "\n{}", report)?;
            }
            MenuChoice::Issues => {
                let issues = self
                    .engine
                    .attendance_issues(&self.registry, self.issue_threshold_pct);
                write!(out, "\n{}", issues)?;
            }
            MenuChoice::Escalations => self.demonstrate_escalations(out)?,
            MenuChoice::ErrorHandling => self.demonstrate_error_handling(out)?,
            MenuChoice::Summary => self.registry_summary(out)?,
            MenuChoice::Exit => {}
        }
        Ok(())
    }

    fn demonstrate_escalations<W: Write>(&mut self, out: &mut W) -> Result<()> {
        writeln!(out, "\nESCALATION DEMONSTRATION")?;
        writeln!(out, "{}", rule('=', 40))?;
        for id in ESCALATION_DEMO_IDS {
            match self.registry.find_mut(id) {
                Some(person) => {
                    writeln!(out, "Escalating {} {}:", person.role(), person.name())?;
                    write!(out, "{}", person.handle_low_attendance())?;
                    writeln!(out)?;
                }
                None => writeln!(out, "No person found with ID: {}", id)?,
            }
        }
        Ok(())
    }

    fn demonstrate_error_handling<W: Write>(&mut self, out: &mut W) -> Result<()> {
        writeln!(out, "\nERROR HANDLING DEMONSTRATION")?;
        writeln!(out, "{}", rule('=', 40))?;

        writeln!(out, "1. Creating a student with GPA 5.0:")?;
        if let Err(e) = Person::student("Test Student", "TEST", "Grade 12", 5.0) {
            writeln!(out, "   Caught: {}", e)?;
        }

        writeln!(out, "2. Marking attendance with a blank date:")?;
        if let Err(e) = self.registry.mark_attendance_str("S001", "", true) {
            writeln!(out, "   Caught: {}", e)?;
        }

        writeln!(out, "3. Marking attendance for an unknown ID:")?;
        if let Err(e) = self.registry.mark_attendance("INVALID_ID", self.today, true) {
            writeln!(out, "   Caught: {}", e)?;
        }

        writeln!(out, "4. Registering a duplicate ID:")?;
        let duplicate = Person::teacher("Duplicate", "S001", "Art", 1, 30_000.0)?;
        if let Err(e) = self.registry.register(duplicate) {
            writeln!(out, "   Caught: {}", e)?;
        }
        Ok(())
    }

    fn registry_summary<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\nREGISTRY SUMMARY")?;
        writeln!(out, "{}", rule('=', 40))?;
        writeln!(out, "Institution: {}", self.registry.institution_name())?;
        writeln!(out, "Total registered persons: {}", self.registry.total_registered())?;
        let days = self.registry.school_days();
        if let (Some(first), Some(last)) = (days.first(), days.last()) {
            writeln!(
                out,
                "School days: {} ({} to {})",
                days.len(),
                format_date(*first),
                format_date(*last)
            )?;
        }
        writeln!(out, "Issue cutoff: {}", format_percent(self.issue_threshold_pct))?;
        Ok(())
    }
}

fn print_menu<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "\n{}", rule('=', 50))?;
    writeln!(out, "ATTENDANCE SYSTEM MENU")?;
    writeln!(out, "{}", rule('=', 50))?;
    writeln!(out, "1. Generate Comprehensive Report")?;
    writeln!(out, "2. Identify Attendance Issues")?;
    writeln!(out, "3. Demonstrate Escalations")?;
    writeln!(out, "4. Demonstrate Error Handling")?;
    writeln!(out, "5. Show Registry Summary")?;
    writeln!(out, "0. Exit")?;
    write!(out, "\nEnter your choice: ")?;
    out.flush()?;
    Ok(())
}
