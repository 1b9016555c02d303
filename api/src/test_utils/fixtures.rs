//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{TimeZone, Utc};

use crate::domain::entities::{
    ControlNumber, EnrollmentDetails, EnrollmentId, EnrollmentRecord, Specialty, SpecialtyId,
    Student, Workshop, WorkshopId,
};

/// Create a test student with a given history
pub fn test_student(control_number: i32, previous_semester: i32, previous_group: &str) -> Student {
    Student {
        control_number: ControlNumber(control_number),
        first_names: "María José".to_string(),
        paternal_surname: "Hernández".to_string(),
        maternal_surname: "López".to_string(),
        previous_group: previous_group.to_string(),
        previous_semester,
    }
}

/// Create a test specialty named after its code
pub fn test_specialty(id: i32, code: &str, enrolled_count: i32) -> Specialty {
    Specialty {
        id: SpecialtyId(id),
        name: format!("Especialidad {}", code),
        code: code.to_string(),
        enrolled_count,
    }
}

/// Create a test workshop
pub fn test_workshop(id: i32, name: &str, enrolled_count: i32) -> Workshop {
    Workshop {
        id: WorkshopId(id),
        name: name.to_string(),
        enrolled_count,
    }
}

/// Create fully joined enrollment details for a second-semester student
pub fn test_enrollment_details() -> EnrollmentDetails {
    let student = test_student(1001, 2, "107");
    let specialty = test_specialty(3, "IQ", 11);
    let workshop = test_workshop(1, "Ajedrez", 5);

    EnrollmentDetails {
        record: EnrollmentRecord {
            id: EnrollmentId(1),
            student_id: student.control_number,
            specialty_id: Some(specialty.id),
            workshop_id: Some(workshop.id),
            group_code: "3IQ".to_string(),
            semester: 3,
            requested_at: Utc.with_ymd_and_hms(2026, 8, 14, 10, 30, 0).unwrap(),
        },
        student,
        specialty: Some(specialty),
        workshop: Some(workshop),
    }
}
