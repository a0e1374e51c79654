use std::path::PathBuf;

use acadexa_command::{Principal, Role};
use clap::Parser;

/// Command-line arguments of the `acadexa` binary.
#[derive(Debug, Parser)]
#[command(name = "acadexa")]
#[command(bin_name = "acadexa")]
#[command(about = "Run ACADEXA voice commands against a student-records dataset", long_about = None)]
pub struct AcadexaCli {
    /// JSON dataset to load. Without one the store starts empty.
    #[arg(long, env = "ACADEXA_DATA")]
    pub data: Option<PathBuf>,

    /// Role of the calling account: admin, hod, teacher or student.
    #[arg(long, env = "ACADEXA_ROLE", default_value = "admin")]
    pub role: Role,

    /// Account id of the caller.
    #[arg(long, env = "ACADEXA_USER_ID", default_value_t = 1)]
    pub user_id: i64,

    /// Student profile linked to the account.
    #[arg(long, env = "ACADEXA_STUDENT_ID")]
    pub student_id: Option<i64>,

    /// Teacher profile linked to the account.
    #[arg(long, env = "ACADEXA_TEACHER_ID")]
    pub teacher_id: Option<i64>,

    /// Print every rule that matches instead of running the command.
    #[arg(long)]
    pub explain: bool,

    /// Print single-line JSON.
    #[arg(long)]
    pub compact: bool,

    /// The command. When omitted, each line of stdin is one command.
    pub words: Vec<String>,
}

impl AcadexaCli {
    /// The principal commands run as.
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.user_id,
            role: self.role,
            student_id: self.student_id,
            teacher_id: self.teacher_id,
        }
    }

    /// The command given on the command line, if any.
    pub fn command(&self) -> Option<String> {
        if self.words.is_empty() {
            None
        } else {
            Some(self.words.join(" "))
        }
    }
}
