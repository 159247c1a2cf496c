//! Plan exports: the JSON plan package, the plain-text offline pack and the
//! Maps directions link

use std::path::PathBuf;

use crate::budget::group_thousands;
use crate::models::GeneratedPlan;
use crate::paths::get_exports_dir;

/// File names keep the destination readable; only path separators are
/// replaced
fn safe_name(destination: &str) -> String {
    let name = destination.replace(['/', '\\'], "-");
    if name.is_empty() {
        "Unknown".to_string()
    } else {
        name
    }
}

pub fn plan_file_name(plan: &GeneratedPlan) -> String {
    format!("WayTrust_{}_Plan.json", safe_name(&plan.destination))
}

pub fn pack_file_name(plan: &GeneratedPlan) -> String {
    format!("WayTrust_Offline_Pack_{}.txt", safe_name(&plan.destination))
}

/// Writes the pretty-printed plan package and returns its path
pub async fn export_plan(plan: &GeneratedPlan) -> Result<PathBuf, String> {
    let dir = get_exports_dir()?;
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| format!("Failed to create exports directory: {}", e))?;
    let path = dir.join(plan_file_name(plan));
    let content = serde_json::to_string_pretty(plan)
        .map_err(|e| format!("Failed to serialize plan: {}", e))?;
    tokio::fs::write(&path, content)
        .await
        .map_err(|e| format!("Failed to write plan package: {}", e))?;
    Ok(path)
}

/// Writes the offline survival pack and returns its path
pub async fn export_offline_pack(plan: &GeneratedPlan) -> Result<PathBuf, String> {
    let dir = get_exports_dir()?;
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| format!("Failed to create exports directory: {}", e))?;
    let path = dir.join(pack_file_name(plan));
    tokio::fs::write(&path, build_offline_pack(plan))
        .await
        .map_err(|e| format!("Failed to write offline pack: {}", e))?;
    Ok(path)
}

/// Formats the fixed-layout survival guide for dead zones: mission overview,
/// village route, emergency contacts, phrases, landmarks, budget dining and
/// the day-by-day itinerary
pub fn build_offline_pack(plan: &GeneratedPlan) -> String {
    let mut content = format!(
        "WAYTRUST TACTICAL TRAVEL PACK: {}\n",
        plan.destination.to_uppercase()
    );
    content += "========================================================\n\n";
    content += "MISSION OVERVIEW:\n";
    let start_date = plan
        .inputs
        .as_ref()
        .map(|i| i.departure_date.as_str())
        .unwrap_or("-");
    content += &format!("Start Date: {}\n", start_date);
    content += &format!("Duration: {} Days\n", plan.itinerary.len());
    content += &format!(
        "Total Est. Budget: ₹{}\n\n",
        group_thousands(plan.total_estimated_cost.round() as i64)
    );

    if let Some(village) = &plan.village_details {
        content += "VILLAGE-FRIENDLY TACTICAL ROUTE:\n";
        content += &format!("Sequence: {}\n", village.transport_sequence);
        content += &format!("Nearest Station: {}\n", village.nearest_station);
        content += &format!("Timings: {}\n", village.local_timings);
        content += "Path:\n";
        for (i, step) in village.step_by_step_path.iter().enumerate() {
            content += &format!("  {}. {}\n", i + 1, step);
        }
        content += "Notes:\n";
        for note in &village.practical_notes {
            content += &format!("  * {}\n", note);
        }
        content += "\n";
    }

    content += "EMERGENCY NODES:\n";
    for contact in &plan.emergency_contacts {
        content += &format!("- {}: {} ({})\n", contact.category, contact.name, contact.contact);
    }
    content += "\n";

    content += "LOCAL PHRASES:\n";
    for phrase in &plan.local_phrases {
        content += &format!(
            "- \"{}\": {} (Phonetic: {})\n",
            phrase.english, phrase.local, phrase.phonetic
        );
    }
    content += "\n";

    content += "OFFLINE NAVIGATION (LANDMARKS):\n";
    for (i, guide) in plan.map_guide.iter().enumerate() {
        content += &format!("{}. {} (Landmark: {})\n", i + 1, guide.instruction, guide.landmark);
    }
    content += "\n";

    content += "BUDGET DINING (OFFLINE READY):\n";
    for food in &plan.offline_food_recommendations {
        content += &format!("- {} at {} (~{})\n", food.dish, food.place_type, food.price_range);
    }
    content += "\n";

    content += "DETAILED ITINERARY:\n";
    for day in &plan.itinerary {
        content += &format!("Day {}: {}\n", day.day, day.theme);
        content += &format!("  Morning: {}\n", day.morning);
        content += &format!("  Afternoon: {}\n", day.afternoon);
        content += &format!("  Evening: {}\n", day.evening);
        content += &format!("  Meal Focus: {}\n\n", day.food_highlight);
    }

    content += "========================================================\n";
    content += "END OF OFFLINE PACK - SAFE TRAVELS\n";
    content
}

/// Google Maps directions link chaining the plan's sightseeing stops
pub fn directions_url(plan: &GeneratedPlan) -> String {
    if plan.sightseeing.is_empty() {
        return "#".to_string();
    }
    let stops = &plan.sightseeing;
    let origin = urlencoding::encode(&stops[0].name).into_owned();
    let destination = urlencoding::encode(&stops[stops.len() - 1].name).into_owned();
    if stops.len() > 2 {
        let waypoints: Vec<String> = stops[1..stops.len() - 1]
            .iter()
            .map(|s| urlencoding::encode(&s.name).into_owned())
            .collect();
        format!(
            "https://www.google.com/maps/dir/{}/{}/{}",
            origin,
            waypoints.join("/"),
            destination
        )
    } else {
        format!("https://www.google.com/maps/dir/{}/{}", origin, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Attraction, EmergencyContact, FoodRecommendation, ItineraryDay, LocalPhrase,
        MapInstruction, VillageDetails,
    };

    fn sample_plan() -> GeneratedPlan {
        GeneratedPlan {
            id: "abc123xyz".to_string(),
            timestamp: 1_700_000_000_000,
            destination: "Jaipur".to_string(),
            total_estimated_cost: 23500.0,
            itinerary: vec![ItineraryDay {
                day: 1,
                morning: "Amber Fort".to_string(),
                afternoon: "City Palace".to_string(),
                evening: "Chokhi Dhani".to_string(),
                estimated_cost: 4000.0,
                theme: "Forts".to_string(),
                food_highlight: "Dal Baati".to_string(),
            }],
            emergency_contacts: vec![EmergencyContact {
                category: "Police".to_string(),
                name: "Control Room".to_string(),
                contact: "100".to_string(),
            }],
            local_phrases: vec![LocalPhrase {
                english: "Thank you".to_string(),
                local: "धन्यवाद".to_string(),
                phonetic: "dhanyavaad".to_string(),
            }],
            offline_food_recommendations: vec![FoodRecommendation {
                dish: "Pyaaz Kachori".to_string(),
                place_type: "Street stall".to_string(),
                price_range: "₹50".to_string(),
            }],
            map_guide: vec![MapInstruction {
                instruction: "Walk north from the clock tower".to_string(),
                landmark: "Hawa Mahal".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn offline_pack_has_the_fixed_section_layout() {
        let pack = build_offline_pack(&sample_plan());
        assert!(pack.starts_with("WAYTRUST TACTICAL TRAVEL PACK: JAIPUR\n"));
        let sections = [
            "MISSION OVERVIEW:",
            "EMERGENCY NODES:",
            "LOCAL PHRASES:",
            "OFFLINE NAVIGATION (LANDMARKS):",
            "BUDGET DINING (OFFLINE READY):",
            "DETAILED ITINERARY:",
            "END OF OFFLINE PACK - SAFE TRAVELS",
        ];
        let mut cursor = 0;
        for section in sections {
            let at = pack[cursor..].find(section);
            assert!(at.is_some(), "missing or misplaced section {}", section);
            cursor += at.unwrap();
        }
        assert!(pack.contains("Total Est. Budget: ₹23,500\n"));
        assert!(pack.contains("- Police: Control Room (100)\n"));
        assert!(pack.contains("1. Walk north from the clock tower (Landmark: Hawa Mahal)\n"));
        assert!(pack.contains("  Meal Focus: Dal Baati\n"));
        // no village section unless the plan carries one
        assert!(!pack.contains("VILLAGE-FRIENDLY TACTICAL ROUTE:"));
    }

    #[test]
    fn offline_pack_includes_village_route_when_present() {
        let mut plan = sample_plan();
        plan.village_details = Some(VillageDetails {
            step_by_step_path: vec!["Walk to the bus stand".to_string(), "Shared auto to Dausa".to_string()],
            transport_sequence: "Walk -> Auto -> Train".to_string(),
            nearest_station: "Dausa Junction".to_string(),
            local_timings: "Buses from 6:30 AM".to_string(),
            practical_notes: vec!["Carry exact change".to_string()],
        });
        let pack = build_offline_pack(&plan);
        assert!(pack.contains("VILLAGE-FRIENDLY TACTICAL ROUTE:"));
        assert!(pack.contains("Sequence: Walk -> Auto -> Train"));
        assert!(pack.contains("  1. Walk to the bus stand\n"));
        assert!(pack.contains("  * Carry exact change\n"));
    }

    #[test]
    fn exported_json_round_trips() {
        let plan = sample_plan();
        let json = serde_json::to_string_pretty(&plan).unwrap();
        let reparsed: GeneratedPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(
            serde_json::to_value(&plan).unwrap(),
            serde_json::to_value(&reparsed).unwrap()
        );
    }

    #[test]
    fn directions_url_chains_waypoints() {
        let mut plan = sample_plan();
        assert_eq!(directions_url(&plan), "#");

        plan.sightseeing = vec![Attraction {
            name: "Amber Fort".to_string(),
            ..Default::default()
        }];
        assert_eq!(
            directions_url(&plan),
            "https://www.google.com/maps/dir/Amber%20Fort/Amber%20Fort"
        );

        plan.sightseeing = vec![
            Attraction { name: "Amber Fort".to_string(), ..Default::default() },
            Attraction { name: "Jal Mahal".to_string(), ..Default::default() },
            Attraction { name: "Hawa Mahal".to_string(), ..Default::default() },
        ];
        assert_eq!(
            directions_url(&plan),
            "https://www.google.com/maps/dir/Amber%20Fort/Jal%20Mahal/Hawa%20Mahal"
        );
    }

    #[test]
    fn file_names_follow_the_destination() {
        let plan = sample_plan();
        assert_eq!(plan_file_name(&plan), "WayTrust_Jaipur_Plan.json");
        assert_eq!(pack_file_name(&plan), "WayTrust_Offline_Pack_Jaipur.txt");
    }
}
