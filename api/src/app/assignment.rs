//! Group assignment rules
//!
//! Pure functions that decide which group a re-enrolling student lands in.
//! A group code is the target semester followed by a two-character
//! specialty code, or "00" when no specialty applies.

/// Suffix used when a group carries no specialty
pub const NO_SPECIALTY_SUFFIX: &str = "00";

/// Minimum length of a previous group code that carries a specialty code
const MIN_GROUP_WITH_SPECIALTY: usize = 3;

/// Specialty code carried by a previous group code: its last two
/// characters, when the code is long enough to hold one.
///
/// `"305IQ"` carries `"IQ"`; `"12"` carries nothing.
pub fn inherited_specialty_code(previous_group: &str) -> Option<&str> {
    let len = previous_group.chars().count();
    if len < MIN_GROUP_WITH_SPECIALTY {
        return None;
    }

    let (start, _) = previous_group.char_indices().nth(len - 2)?;
    Some(&previous_group[start..])
}

/// Compute the group code for a new enrollment record.
///
/// Students coming out of second semester are grouped by the specialty
/// they just chose. Everyone else keeps the specialty suffix of their
/// previous group.
pub fn derive_group_code(
    target_semester: i32,
    previous_semester: i32,
    specialty_code: Option<&str>,
    previous_group: &str,
) -> String {
    let suffix = if previous_semester == crate::domain::entities::SPECIALTY_CHOICE_SEMESTER {
        specialty_code.unwrap_or(NO_SPECIALTY_SUFFIX)
    } else {
        inherited_specialty_code(previous_group).unwrap_or(NO_SPECIALTY_SUFFIX)
    };

    format!("{}{}", target_semester, suffix)
}
