use serde::{Deserialize, Serialize};

/// The four user personas. Wire names are English; the Spanish names the
/// front end originally used are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Parent,
    Administrator,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" | "estudiante" => Some(Self::Student),
            "teacher" | "docente" => Some(Self::Teacher),
            "parent" | "padres" => Some(Self::Parent),
            "administrator" | "directivo" => Some(Self::Administrator),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Parent => "parent",
            Self::Administrator => "administrator",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Student => "Estudiante",
            Self::Teacher => "Docente",
            Self::Parent => "Padres de Familia",
            Self::Administrator => "Directivo",
        }
    }

    /// Program label shown on the student profile when it is derived from a
    /// registration record.
    pub fn program_label(self) -> &'static str {
        match self {
            Self::Student => "Tecnologías de la Información DSM",
            Self::Teacher => "Docente",
            Self::Parent => "N/A",
            Self::Administrator => "Administración",
        }
    }

    pub fn dashboard(self) -> Screen {
        match self {
            Self::Student => Screen::StudentDashboard,
            Self::Teacher => Screen::TeacherDashboard,
            Self::Parent => Screen::ParentDashboard,
            Self::Administrator => Screen::AdminDashboard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    RoleSelection,
    Registration,
    StudentDashboard,
    TeacherDashboard,
    ParentDashboard,
    AdminDashboard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub id: String,
    pub role: Role,
    pub name: String,
    pub email: String,
    pub password_digest: String,
    pub institutional_id: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub name: String,
    pub program: String,
    pub institutional_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [Self::Present, Self::Absent, Self::Late];

    pub fn label(self) -> &'static str {
        match self {
            Self::Present => "Presente",
            Self::Absent => "Ausente",
            Self::Late => "Retardo",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub date: String,
    pub time: String,
    pub subject: String,
    pub instructor: String,
    pub status: AttendanceStatus,
    /// Display text for `status`.
    pub status_label: String,
}

/// Reporting period for the parent view. Counts scale by `multiplier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    Bimester,
    Semester,
}

impl Period {
    /// Unknown names fall back to a week.
    pub fn parse_or_week(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" | "mes" => Self::Month,
            "bimester" | "bimestre" => Self::Bimester,
            "semester" | "semestre" => Self::Semester,
            _ => Self::Week,
        }
    }

    pub fn multiplier(self) -> u32 {
        match self {
            Self::Week => 1,
            Self::Month => 4,
            Self::Bimester => 8,
            Self::Semester => 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub percentage: u32,
    pub entries: Vec<AttendanceEntry>,
}

/// Student self check-in, appended to the session attendance log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRecord {
    pub student: StudentProfile,
    pub date: String,
    pub time: String,
    pub instructor: String,
    pub subject: String,
    pub timestamp: String,
}

/// Status literal of a roster cell; the editor's selector offers only these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    #[serde(rename = "✓")]
    Checked,
    #[serde(rename = "-")]
    Blank,
}

impl Mark {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "✓" => Some(Self::Checked),
            "-" => Some(Self::Blank),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Checked => "✓",
            Self::Blank => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRow {
    pub name: String,
    pub present: Mark,
    pub absent: Mark,
    pub late: Mark,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportDimension {
    Program,
    Instructor,
    Period,
}

impl ReportDimension {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "program" | "carrera" => Some(Self::Program),
            "instructor" | "docente" => Some(Self::Instructor),
            "period" | "periodo" => Some(Self::Period),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::Instructor => "instructor",
            Self::Period => "period",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Spreadsheet,
    Document,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spreadsheet" | "excel" => Some(Self::Spreadsheet),
            "document" | "pdf" => Some(Self::Document),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Spreadsheet => "EXCEL",
            Self::Document => "PDF",
        }
    }
}
