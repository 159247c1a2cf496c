//! Static destination catalog seeding the recommendation grids

use std::sync::OnceLock;

use crate::models::{Destination, DestinationCategory, TransportMode, TripInputs};

pub fn all() -> &'static [Destination] {
    static DESTINATIONS: OnceLock<Vec<Destination>> = OnceLock::new();
    DESTINATIONS.get_or_init(build_catalog)
}

/// Catalog entries matching a category; `Any` keeps the full list
pub fn by_category(category: DestinationCategory) -> Vec<Destination> {
    if category == DestinationCategory::Any {
        return all().to_vec();
    }
    all().iter().filter(|d| d.kind == category).cloned().collect()
}

pub fn find_by_name(name: &str) -> Option<&'static Destination> {
    all().iter().find(|d| d.name.eq_ignore_ascii_case(name))
}

/// Default planner inputs for a catalog destination, used when a plan is
/// launched straight from the gallery
pub fn prefill_inputs(destination: &Destination, departure_date: &str) -> TripInputs {
    TripInputs {
        budget: ((destination.base_cost * 2.5) as i64).to_string(),
        duration: "4".to_string(),
        persons: "2".to_string(),
        location: "New Delhi".to_string(),
        departure_date: departure_date.to_string(),
        transport: TransportMode::Train,
        destination_type: destination.kind,
        target_destination: destination.name.clone(),
        food_preference: "Flexible".to_string(),
        mood: "Exploratory".to_string(),
        village_friendly_mode: false,
    }
}

fn entry(
    id: &str,
    name: &str,
    description: &str,
    image: &str,
    base_cost: f64,
    kind: DestinationCategory,
    tags: &[&str],
) -> Destination {
    Destination {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        base_cost,
        kind,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn build_catalog() -> Vec<Destination> {
    vec![
        entry(
            "goa",
            "Goa",
            "Sun-drenched beaches, Portuguese-era quarters and a laid-back shack culture along the Arabian Sea.",
            "https://images.unsplash.com/photo-1512343879784-a960bf40e7f2?q=80&w=1600&auto=format&fit=crop",
            12000.0,
            DestinationCategory::Beach,
            &["beaches", "nightlife", "seafood"],
        ),
        entry(
            "manali",
            "Manali",
            "Himalayan valley town of apple orchards, snow passes and riverside cafes at the foot of the Rohtang.",
            "https://images.unsplash.com/photo-1506461883276-594a12b11cf3?q=80&w=1600&auto=format&fit=crop",
            10000.0,
            DestinationCategory::HillStation,
            &["mountains", "snow", "trekking"],
        ),
        entry(
            "jaipur",
            "Jaipur",
            "The Pink City of forts and palaces, where Rajput grandeur meets bustling bazaars.",
            "https://images.unsplash.com/photo-1477587458883-47145ed94245?q=80&w=1600&auto=format&fit=crop",
            9000.0,
            DestinationCategory::Heritage,
            &["forts", "palaces", "bazaars"],
        ),
        entry(
            "varanasi",
            "Varanasi",
            "Ancient ghats on the Ganga, dawn aartis and the oldest living city rituals in India.",
            "https://images.unsplash.com/photo-1561361058-c24cecae35ca?q=80&w=1600&auto=format&fit=crop",
            7000.0,
            DestinationCategory::Spiritual,
            &["ghats", "temples", "ganga"],
        ),
        entry(
            "rishikesh",
            "Rishikesh",
            "Yoga capital on the Ganges with white-water rafting, cliff jumps and forest ashrams.",
            "https://images.unsplash.com/photo-1591018533273-11de49ac9d23?q=80&w=1600&auto=format&fit=crop",
            8000.0,
            DestinationCategory::Adventure,
            &["rafting", "yoga", "camping"],
        ),
        entry(
            "mumbai",
            "Mumbai",
            "The maximum city: colonial landmarks, street food lanes and the sea-link skyline.",
            "https://images.unsplash.com/photo-1529253355930-ddbe423a2ac7?q=80&w=1600&auto=format&fit=crop",
            15000.0,
            DestinationCategory::CityBreak,
            &["streetfood", "bollywood", "seaface"],
        ),
        entry(
            "alleppey",
            "Alleppey",
            "Kerala backwaters of palm-fringed canals, houseboat stays and toddy-shop lunches.",
            "https://images.unsplash.com/photo-1593693397690-362cb9666fc2?q=80&w=1600&auto=format&fit=crop",
            11000.0,
            DestinationCategory::Beach,
            &["backwaters", "houseboat", "ayurveda"],
        ),
        entry(
            "leh",
            "Leh-Ladakh",
            "High-altitude desert of monasteries, turquoise lakes and the world's highest road passes.",
            "https://images.unsplash.com/photo-1581791534721-e599df4417f7?q=80&w=1600&auto=format&fit=crop",
            18000.0,
            DestinationCategory::Adventure,
            &["passes", "monasteries", "lakes"],
        ),
        entry(
            "hampi",
            "Hampi",
            "Boulder-strewn ruins of the Vijayanagara empire beside the Tungabhadra river.",
            "https://images.unsplash.com/photo-1600100397608-f010f5132c2a?q=80&w=1600&auto=format&fit=crop",
            8500.0,
            DestinationCategory::Heritage,
            &["ruins", "boulders", "cycling"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_category_returns_everything() {
        assert_eq!(by_category(DestinationCategory::Any).len(), all().len());
    }

    #[test]
    fn category_filter_is_exact() {
        let beaches = by_category(DestinationCategory::Beach);
        assert!(!beaches.is_empty());
        assert!(beaches.iter().all(|d| d.kind == DestinationCategory::Beach));
    }

    #[test]
    fn name_lookup_ignores_case() {
        assert!(find_by_name("goa").is_some());
        assert!(find_by_name("GOA").is_some());
        assert!(find_by_name("Atlantis").is_none());
    }

    #[test]
    fn prefill_scales_budget_from_base_cost() {
        let dest = find_by_name("Jaipur").expect("catalog entry");
        let inputs = prefill_inputs(dest, "2025-12-01");
        assert_eq!(inputs.budget, "22500");
        assert_eq!(inputs.duration, "4");
        assert_eq!(inputs.persons, "2");
        assert_eq!(inputs.target_destination, "Jaipur");
        assert_eq!(inputs.departure_date, "2025-12-01");
    }
}
