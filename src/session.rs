//! User session store: one serialized JSON blob, rewritten whole on every
//! mutation, plus the collection operations the planner and profile views
//! drive.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{Accommodation, BookedAccommodation, GeneratedPlan, User};
use crate::paths::get_session_path;

/// Loads the persisted user record, if any
pub fn load_user() -> Result<Option<User>, String> {
    let path = get_session_path()?;
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read session: {}", e))?;
    let user: User =
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse session: {}", e))?;
    Ok(Some(user))
}

/// Rewrites the whole session blob
pub fn save_user(user: &User) -> Result<(), String> {
    let path = get_session_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory: {}", e))?;
    }
    let content = serde_json::to_string_pretty(user)
        .map_err(|e| format!("Failed to serialize session: {}", e))?;
    std::fs::write(&path, content).map_err(|e| format!("Failed to save session: {}", e))
}

/// Removes the session blob (logout)
pub fn clear_user() -> Result<(), String> {
    let path = get_session_path()?;
    if path.exists() {
        std::fs::remove_file(&path).map_err(|e| format!("Failed to clear session: {}", e))?;
    }
    Ok(())
}

/// Checks identity fields, naming the offending one
pub fn validate_profile(full_name: &str, email: &str, phone: &str) -> Result<(), String> {
    if full_name.trim().is_empty() {
        return Err("Name is required".to_string());
    }
    if !is_valid_email(email) {
        return Err("Invalid email".to_string());
    }
    if !is_valid_phone(phone) {
        return Err("Enter a valid 10-digit number".to_string());
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(|c| c.is_whitespace()) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .match_indices('.')
        .any(|(i, _)| i > 0 && i + 1 < domain.len())
}

fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit())
}

/// Prepends the plan to the saved list unless its id is already present.
/// Returns whether anything changed.
pub fn save_trip(user: &mut User, plan: GeneratedPlan) -> bool {
    if user.saved_trips.iter().any(|t| t.id == plan.id) {
        return false;
    }
    user.saved_trips.insert(0, plan);
    true
}

/// Removes a saved plan by id; absent ids leave the list unchanged. Bookings
/// made from the plan are deliberately untouched.
pub fn delete_trip(user: &mut User, id: &str) {
    user.saved_trips.retain(|t| t.id != id);
}

/// Books an accommodation out of a plan, denormalizing the destination name
/// at booking time, and saves the plan itself if it was not saved yet
pub fn book_accommodation(
    user: &mut User,
    plan: &GeneratedPlan,
    accommodation: Accommodation,
) -> BookedAccommodation {
    let booking = BookedAccommodation {
        accommodation,
        id: random_id(),
        booking_date: now_millis(),
        destination: plan.destination.clone(),
    };
    user.booked_accommodations.insert(0, booking.clone());
    save_trip(user, plan.clone());
    booking
}

pub fn delete_booking(user: &mut User, id: &str) {
    user.booked_accommodations.retain(|b| b.id != id);
}

/// 9-char base-36 id, unique within a session
pub fn random_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let step = COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut value = nanos ^ step.wrapping_mul(0x9e37_79b9_7f4a_7c15);

    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut id = String::with_capacity(9);
    for _ in 0..9 {
        id.push(ALPHABET[(value % 36) as usize] as char);
        value /= 36;
    }
    id
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            full_name: "Asha Verma".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            saved_trips: Vec::new(),
            booked_accommodations: Vec::new(),
        }
    }

    fn plan_with_id(id: &str, destination: &str) -> GeneratedPlan {
        GeneratedPlan {
            id: id.to_string(),
            destination: destination.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn saving_same_plan_twice_keeps_one_entry() {
        let mut user = sample_user();
        assert!(save_trip(&mut user, plan_with_id("abc", "Goa")));
        assert!(!save_trip(&mut user, plan_with_id("abc", "Goa")));
        assert_eq!(user.saved_trips.len(), 1);
    }

    #[test]
    fn newest_saved_trip_comes_first() {
        let mut user = sample_user();
        save_trip(&mut user, plan_with_id("first", "Goa"));
        save_trip(&mut user, plan_with_id("second", "Manali"));
        assert_eq!(user.saved_trips[0].id, "second");
    }

    #[test]
    fn deleting_absent_trip_is_a_no_op() {
        let mut user = sample_user();
        save_trip(&mut user, plan_with_id("abc", "Goa"));
        delete_trip(&mut user, "nope");
        assert_eq!(user.saved_trips.len(), 1);
        delete_trip(&mut user, "abc");
        assert!(user.saved_trips.is_empty());
    }

    #[test]
    fn booking_denormalizes_destination_and_saves_plan() {
        let mut user = sample_user();
        let plan = plan_with_id("abc", "Jaipur");
        let accommodation = Accommodation {
            name: "Haveli Stay".to_string(),
            kind: "Mid-range".to_string(),
            price_per_night: 2500.0,
            contact_info: "https://example.com".to_string(),
            description: "Courtyard rooms".to_string(),
        };
        let booking = book_accommodation(&mut user, &plan, accommodation);
        assert_eq!(booking.destination, "Jaipur");
        assert!(!booking.id.is_empty());
        assert_eq!(user.booked_accommodations.len(), 1);
        // booking also archives the plan
        assert_eq!(user.saved_trips.len(), 1);

        // a deleted plan does not cascade to its bookings
        delete_trip(&mut user, "abc");
        assert_eq!(user.booked_accommodations.len(), 1);

        delete_booking(&mut user, &booking.id);
        assert!(user.booked_accommodations.is_empty());
    }

    #[test]
    fn profile_validation_names_the_field() {
        assert!(validate_profile("Asha", "asha@example.com", "9876543210").is_ok());
        assert_eq!(
            validate_profile("  ", "asha@example.com", "9876543210").unwrap_err(),
            "Name is required"
        );
        assert_eq!(
            validate_profile("Asha", "not-an-email", "9876543210").unwrap_err(),
            "Invalid email"
        );
        assert_eq!(
            validate_profile("Asha", "asha@example.com", "12345").unwrap_err(),
            "Enter a valid 10-digit number"
        );
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.domain.in"));
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@bco"));
        assert!(!is_valid_email("a@.co"));
    }

    #[test]
    fn phone_must_be_ten_digits() {
        assert!(is_valid_phone("9876543210"));
        assert!(!is_valid_phone("987654321"));
        assert!(!is_valid_phone("98765432100"));
        assert!(!is_valid_phone("98765abcde"));
    }

    #[test]
    fn random_ids_are_base36_and_distinct() {
        let a = random_id();
        let b = random_id();
        assert_eq!(a.len(), 9);
        assert!(a.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_ne!(a, b);
    }
}
