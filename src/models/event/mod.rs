// Event module
// Scheduled class/session model

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::court::Court;
use crate::models::instructor::Instructor;

/// Lifecycle status of a scheduled class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassStatus {
    Confirmed,
    Pending,
    Cancelled,
    Completed,
}

impl ClassStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ClassStatus::Confirmed => "Confirmed",
            ClassStatus::Pending => "Pending",
            ClassStatus::Cancelled => "Cancelled",
            ClassStatus::Completed => "Completed",
        }
    }
}

/// Class-type tag used for color-coding event cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassType {
    Tennis,
    Padel,
    Yoga,
    Pilates,
    Fitness,
    Junior,
}

impl ClassType {
    pub fn label(&self) -> &'static str {
        match self {
            ClassType::Tennis => "Tennis",
            ClassType::Padel => "Padel",
            ClassType::Yoga => "Yoga",
            ClassType::Pilates => "Pilates",
            ClassType::Fitness => "Fitness",
            ClassType::Junior => "Junior",
        }
    }

    /// Hex color for event cards, parsed by the view layer.
    pub fn color(&self) -> &'static str {
        match self {
            ClassType::Tennis => "#4C8C4A",
            ClassType::Padel => "#3A7CA5",
            ClassType::Yoga => "#8E6BAF",
            ClassType::Pilates => "#C2793F",
            ClassType::Fitness => "#B5484D",
            ClassType::Junior => "#4FA3A5",
        }
    }
}

/// Minimal reference to a client attending a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRef {
    pub id: i64,
    pub name: String,
}

impl ClientRef {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Who is booked onto a class.
///
/// An explicit tagged variant so that "nobody assigned" is never conflated
/// with "a group booking that happens to be empty".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Attendance {
    #[default]
    Unassigned,
    Single(ClientRef),
    Group(Vec<ClientRef>),
}

impl Attendance {
    pub fn count(&self) -> usize {
        match self {
            Attendance::Unassigned => 0,
            Attendance::Single(_) => 1,
            Attendance::Group(clients) => clients.len(),
        }
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, Attendance::Unassigned)
    }
}

/// A scheduled class on a court, the unit the drag engine reschedules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassEvent {
    pub id: Option<i64>,
    pub title: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub court: Court,
    pub instructor: Instructor,
    pub class_type: ClassType,
    pub status: ClassStatus,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub attendance: Attendance,
}

impl ClassEvent {
    /// Create a new class with required fields.
    ///
    /// # Arguments
    /// * `title` - Class title (required, non-empty)
    /// * `start` - Start time
    /// * `end` - End time (must be after start)
    /// * `court` - The court the class is booked on
    /// * `instructor` - The assigned instructor
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Local>,
        end: DateTime<Local>,
        court: Court,
        instructor: Instructor,
    ) -> Result<Self, String> {
        let title = title.into();

        if title.trim().is_empty() {
            return Err("Class title cannot be empty".to_string());
        }

        if end <= start {
            return Err("Class end time must be after start time".to_string());
        }

        Ok(Self {
            id: None,
            title,
            start,
            end,
            court,
            instructor,
            class_type: ClassType::Fitness,
            status: ClassStatus::Confirmed,
            price: None,
            description: None,
            notes: None,
            attendance: Attendance::Unassigned,
        })
    }

    /// Create a builder for constructing classes with optional fields.
    pub fn builder() -> ClassEventBuilder {
        ClassEventBuilder::new()
    }

    /// Validate the class.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Class title cannot be empty".to_string());
        }

        if self.end <= self.start {
            return Err("Class end time must be after start time".to_string());
        }

        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err("Class price must be a non-negative amount".to_string());
            }
        }

        Ok(())
    }

    /// Duration of the class. Preserved exactly when the class is moved.
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// Builder for creating classes with optional fields.
pub struct ClassEventBuilder {
    title: Option<String>,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
    court: Option<Court>,
    instructor: Option<Instructor>,
    class_type: ClassType,
    status: ClassStatus,
    price: Option<f64>,
    description: Option<String>,
    notes: Option<String>,
    attendance: Attendance,
}

impl ClassEventBuilder {
    pub fn new() -> Self {
        Self {
            title: None,
            start: None,
            end: None,
            court: None,
            instructor: None,
            class_type: ClassType::Fitness,
            status: ClassStatus::Confirmed,
            price: None,
            description: None,
            notes: None,
            attendance: Attendance::Unassigned,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Local>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn court(mut self, court: Court) -> Self {
        self.court = Some(court);
        self
    }

    pub fn instructor(mut self, instructor: Instructor) -> Self {
        self.instructor = Some(instructor);
        self
    }

    pub fn class_type(mut self, class_type: ClassType) -> Self {
        self.class_type = class_type;
        self
    }

    pub fn status(mut self, status: ClassStatus) -> Self {
        self.status = status;
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn attendance(mut self, attendance: Attendance) -> Self {
        self.attendance = attendance;
        self
    }

    pub fn build(self) -> Result<ClassEvent, String> {
        let title = self.title.ok_or("Class title is required")?;
        let start = self.start.ok_or("Class start time is required")?;
        let end = self.end.ok_or("Class end time is required")?;
        let court = self.court.ok_or("Class court is required")?;
        let instructor = self.instructor.ok_or("Class instructor is required")?;

        let event = ClassEvent {
            id: None,
            title,
            start,
            end,
            court,
            instructor,
            class_type: self.class_type,
            status: self.status,
            price: self.price,
            description: self.description,
            notes: self.notes,
            attendance: self.attendance,
        };

        event.validate()?;
        Ok(event)
    }
}

impl Default for ClassEventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::court::CourtKind;
    use chrono::Duration;

    fn sample_court() -> Court {
        Court::new(1, "Court A", CourtKind::Tennis)
    }

    fn sample_instructor() -> Instructor {
        Instructor::new(1, "Ana")
    }

    fn sample_start() -> DateTime<Local> {
        Local::now()
    }

    fn sample_end() -> DateTime<Local> {
        Local::now() + Duration::hours(1)
    }

    #[test]
    fn test_new_class_success() {
        let start = sample_start();
        let end = sample_end();
        let result = ClassEvent::new("Yoga", start, end, sample_court(), sample_instructor());

        assert!(result.is_ok());
        let event = result.unwrap();
        assert_eq!(event.title, "Yoga");
        assert_eq!(event.start, start);
        assert_eq!(event.end, end);
        assert_eq!(event.status, ClassStatus::Confirmed);
        assert!(event.attendance.is_unassigned());
    }

    #[test]
    fn test_new_class_empty_title() {
        let result = ClassEvent::new(
            "   ",
            sample_start(),
            sample_end(),
            sample_court(),
            sample_instructor(),
        );
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), "Class title cannot be empty");
    }

    #[test]
    fn test_new_class_invalid_times() {
        let start = sample_start();
        let end = start - Duration::hours(1);
        let result = ClassEvent::new("Yoga", start, end, sample_court(), sample_instructor());

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err(),
            "Class end time must be after start time"
        );
    }

    #[test]
    fn test_new_class_equal_times() {
        let start = sample_start();
        let result = ClassEvent::new("Yoga", start, start, sample_court(), sample_instructor());
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_with_optional_fields() {
        let event = ClassEvent::builder()
            .title("Padel Intro")
            .start(sample_start())
            .end(sample_end())
            .court(sample_court())
            .instructor(sample_instructor())
            .class_type(ClassType::Padel)
            .price(25.0)
            .description("Beginner friendly")
            .attendance(Attendance::Group(vec![
                ClientRef::new(1, "Mia"),
                ClientRef::new(2, "Leo"),
            ]))
            .build()
            .unwrap();

        assert_eq!(event.class_type, ClassType::Padel);
        assert_eq!(event.price, Some(25.0));
        assert_eq!(event.description.as_deref(), Some("Beginner friendly"));
        assert_eq!(event.attendance.count(), 2);
    }

    #[test]
    fn test_builder_missing_court() {
        let result = ClassEvent::builder()
            .title("Yoga")
            .start(sample_start())
            .end(sample_end())
            .instructor(sample_instructor())
            .build();

        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), "Class court is required");
    }

    #[test]
    fn test_validate_negative_price() {
        let mut event = ClassEvent::new(
            "Yoga",
            sample_start(),
            sample_end(),
            sample_court(),
            sample_instructor(),
        )
        .unwrap();
        event.price = Some(-5.0);

        assert!(event.validate().is_err());
    }

    #[test]
    fn test_duration() {
        let start = sample_start();
        let end = start + Duration::minutes(90);
        let event =
            ClassEvent::new("Yoga", start, end, sample_court(), sample_instructor()).unwrap();

        assert_eq!(event.duration(), Duration::minutes(90));
    }

    #[test]
    fn test_attendance_empty_group_is_not_unassigned() {
        let group = Attendance::Group(Vec::new());
        assert_eq!(group.count(), 0);
        assert!(!group.is_unassigned());
    }
}
