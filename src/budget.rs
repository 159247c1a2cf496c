//! Derived trip analytics: budget split, viability, confidence score,
//! packing checklist and the trade-off simulator. Pure functions,
//! recomputed on every input change.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{
    BudgetBreakdown, DestinationCategory, GeneratedPlan, TransportMode, TripInputs,
};

pub const COLOR_GREEN: &str = "#34d399";
pub const COLOR_RED: &str = "#f87171";
pub const COLOR_YELLOW: &str = "#facc15";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViabilityAssessment {
    pub score: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetReport {
    pub breakdown: BudgetBreakdown,
    pub viability: ViabilityAssessment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceFactor {
    pub label: String,
    pub status: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceReport {
    pub total: u32,
    pub factors: Vec<ConfidenceFactor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingChecklist {
    pub clothes: Vec<String>,
    pub medicines: Vec<String>,
    pub essentials: Vec<String>,
}

fn transport_weight(transport: TransportMode) -> f64 {
    match transport {
        TransportMode::Flight => 0.3,
        TransportMode::Car => 0.2,
        TransportMode::Train => 0.15,
        TransportMode::Bus => 0.1,
    }
}

/// Splits the budget into transport/stay/food/activities and labels the
/// per-person-per-day spend. Returns None unless all three figures are
/// positive.
pub fn assess(
    budget: f64,
    duration: f64,
    persons: f64,
    transport: TransportMode,
) -> Option<BudgetReport> {
    if budget <= 0.0 || duration <= 0.0 || persons <= 0.0 {
        return None;
    }

    let transport_cost = budget * transport_weight(transport);
    let rest = budget - transport_cost;
    let breakdown = BudgetBreakdown {
        transport: transport_cost,
        stay: rest * 0.45,
        food: rest * 0.3,
        activities: rest * 0.25,
    };

    let per_person_per_day = budget / (persons * duration);
    let viability = if per_person_per_day > 8000.0 {
        ViabilityAssessment {
            score: "Excellent".to_string(),
            color: COLOR_GREEN.to_string(),
        }
    } else if per_person_per_day < 2500.0 {
        ViabilityAssessment {
            score: "Tight".to_string(),
            color: COLOR_RED.to_string(),
        }
    } else {
        ViabilityAssessment {
            score: "Manageable".to_string(),
            color: COLOR_YELLOW.to_string(),
        }
    };

    Some(BudgetReport { breakdown, viability })
}

/// Weighted 0-100 trip-confidence score derived from the generated plan and
/// its input echo
pub fn confidence(plan: &GeneratedPlan) -> Option<ConfidenceReport> {
    let inputs = plan.inputs.as_ref()?;

    let condition = plan.weather.condition.to_lowercase();
    let weather_score: f64 = if condition.contains("clear")
        || condition.contains("sunny")
        || condition.contains("pleasant")
    {
        100.0
    } else if condition.contains("rain") || condition.contains("monsoon") {
        50.0
    } else if condition.contains("storm") || condition.contains("extreme") {
        30.0
    } else {
        70.0
    };

    let user_budget: f64 = inputs.budget.parse().unwrap_or(0.0);
    let estimated = plan.total_estimated_cost;
    let budget_score = if user_budget >= estimated {
        100.0
    } else if estimated > 0.0 {
        (user_budget / estimated * 100.0).max(0.0)
    } else {
        0.0
    };

    // Nov-Feb is the high season almost everywhere in India
    let is_peak = NaiveDate::parse_from_str(&inputs.departure_date, "%Y-%m-%d")
        .map(|d| d.month() >= 11 || d.month() <= 2)
        .unwrap_or(false);
    let crowd_score: f64 = if is_peak { 65.0 } else { 90.0 };

    let time_score: f64 = match inputs.transport {
        TransportMode::Flight => 100.0,
        TransportMode::Train => 85.0,
        _ => 70.0,
    };

    let total = (weather_score * 0.3 + budget_score * 0.3 + crowd_score * 0.2 + time_score * 0.2)
        .round() as u32;

    let status = |score: f64, strong: f64, fair: f64, labels: [&str; 3]| {
        if score > strong {
            labels[0].to_string()
        } else if score > fair {
            labels[1].to_string()
        } else {
            labels[2].to_string()
        }
    };

    Some(ConfidenceReport {
        total,
        factors: vec![
            ConfidenceFactor {
                label: "Weather Suitability".to_string(),
                status: status(weather_score, 70.0, 40.0, ["Optimal", "Fair", "Poor"]),
                icon: "fa-cloud-sun".to_string(),
            },
            ConfidenceFactor {
                label: "Budget Calibration".to_string(),
                status: status(budget_score, 90.0, 60.0, ["Strong", "Moderate", "Tight"]),
                icon: "fa-wallet".to_string(),
            },
            ConfidenceFactor {
                label: "Projected Density".to_string(),
                status: if crowd_score > 80.0 { "Low".to_string() } else { "Moderate".to_string() },
                icon: "fa-users".to_string(),
            },
            ConfidenceFactor {
                label: "Transit Efficiency".to_string(),
                status: if time_score > 80.0 {
                    "Comfortable".to_string()
                } else {
                    "Standard".to_string()
                },
                icon: "fa-clock".to_string(),
            },
        ],
    })
}

/// Climate- and trip-shape-aware packing lists
pub fn packing_checklist(plan: &GeneratedPlan) -> Option<PackingChecklist> {
    let inputs = plan.inputs.as_ref()?;
    let climate = plan.weather.condition.to_lowercase();
    let duration: f64 = inputs.duration.parse().unwrap_or(0.0);
    let persons: f64 = inputs.persons.parse().unwrap_or(0.0);

    let is_cold = climate.contains("cold")
        || climate.contains("snow")
        || climate.contains("winter")
        || inputs.destination_type == DestinationCategory::HillStation;
    let is_warm = climate.contains("warm")
        || climate.contains("beach")
        || climate.contains("sunny")
        || inputs.destination_type == DestinationCategory::Beach;
    let is_rainy = climate.contains("rain") || climate.contains("monsoon");

    let mut clothes: Vec<String> = Vec::new();
    if is_cold {
        clothes.push("Heavy woolens & thermal innerwear".to_string());
        clothes.push("Down jacket & waterproof gloves".to_string());
        clothes.push("Woolen socks & beanie".to_string());
    } else if is_warm {
        clothes.push("Light cotton breathable fabrics".to_string());
        clothes.push("Swimwear & flip-flops".to_string());
        clothes.push("Sun hat & linen shirts".to_string());
    } else {
        clothes.push("Comfortable layers (shirts, jackets)".to_string());
        clothes.push("Denim or versatile trousers".to_string());
    }
    if is_rainy {
        clothes.push("Lightweight raincoat or poncho".to_string());
        clothes.push("Water-resistant footwear".to_string());
    }
    clothes.push(format!(
        "{} pairs of socks/undergarments",
        (duration * 1.2).ceil() as i64
    ));
    clothes.push("Walking shoes for exploration".to_string());

    let mut medicines: Vec<String> = vec![
        "Personal prescription medications".to_string(),
        "Basic first-aid kit (bandages, antiseptic)".to_string(),
        "Painkillers & antacids".to_string(),
        "ORS packets for hydration".to_string(),
    ];
    if is_warm {
        medicines.push("Sunscreen (SPF 50+) & Aloe Vera gel".to_string());
    }
    if is_cold {
        medicines.push("Cold & cough relief tablets".to_string());
        medicines.push("Lip balm & moisturizer".to_string());
    }

    let mut essentials: Vec<String> = vec![
        "Universal travel adapter".to_string(),
        "Power bank (10000mAh+)".to_string(),
        "Original IDs & digital copies".to_string(),
        "Reusable water bottle".to_string(),
    ];
    if persons > 1.0 {
        essentials.push("Shared travel documents folder".to_string());
    }
    if inputs.destination_type == DestinationCategory::Adventure {
        essentials.push("Compact flashlight or headlamp".to_string());
        essentials.push("Daypack for treks".to_string());
    }

    Some(PackingChecklist { clothes, medicines, essentials })
}

/// Feedback sentence for the comfort/pacing trade-off sliders (0-100 each,
/// 50 is neutral)
pub fn trade_off_feedback(comfort: i64, pacing: i64) -> String {
    let cost_delta = (comfort - 50) * 100;
    let time_delta = (pacing - 50) as f64 / 10.0;

    let cost_text = if cost_delta > 0 {
        format!("Saving ₹{}", group_thousands(cost_delta.abs()))
    } else {
        format!("Adding ₹{} for luxury", group_thousands(cost_delta.abs()))
    };

    let time_text = if time_delta > 0.0 {
        format!("adds {} travel hours", time_delta.abs())
    } else {
        format!("saves {} hours via direct transit", time_delta.abs())
    };

    let flavor_text = if pacing > 50 {
        "but increases scenic immersion"
    } else {
        "with optimized neural routing"
    };

    format!("{} {} {}.", cost_text, time_text, flavor_text)
}

/// Groups a non-negative amount into comma-separated thousands
pub fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherInfo;

    fn sample_inputs(budget: &str, transport: TransportMode, date: &str) -> TripInputs {
        TripInputs {
            budget: budget.to_string(),
            duration: "4".to_string(),
            persons: "2".to_string(),
            location: "New Delhi".to_string(),
            departure_date: date.to_string(),
            transport,
            destination_type: DestinationCategory::Any,
            target_destination: "Jaipur".to_string(),
            food_preference: "Flexible".to_string(),
            mood: "Exploratory".to_string(),
            village_friendly_mode: false,
        }
    }

    #[test]
    fn worked_example_from_train_trip() {
        let report = assess(25000.0, 4.0, 2.0, TransportMode::Train).expect("positive inputs");
        assert_eq!(report.breakdown.transport, 3750.0);
        assert_eq!(report.breakdown.stay, 9562.5);
        assert_eq!(report.breakdown.food, 6375.0);
        assert_eq!(report.breakdown.activities, 5312.5);
        assert_eq!(report.viability.score, "Manageable");
    }

    #[test]
    fn components_sum_to_budget() {
        for (budget, duration, persons, mode) in [
            (25000.0, 4.0, 2.0, TransportMode::Train),
            (100000.0, 3.0, 1.0, TransportMode::Flight),
            (4999.0, 7.0, 5.0, TransportMode::Bus),
            (62350.0, 10.0, 3.0, TransportMode::Car),
        ] {
            let report = assess(budget, duration, persons, mode).expect("positive inputs");
            let sum = report.breakdown.transport
                + report.breakdown.stay
                + report.breakdown.food
                + report.breakdown.activities;
            assert!((sum - budget).abs() < 1e-6, "sum {} != budget {}", sum, budget);
        }
    }

    #[test]
    fn viability_thresholds_are_strict() {
        // exactly 8000 and exactly 2500 per person per day stay Manageable
        let at_upper = assess(8000.0, 1.0, 1.0, TransportMode::Bus).unwrap();
        assert_eq!(at_upper.viability.score, "Manageable");
        let above = assess(8001.0, 1.0, 1.0, TransportMode::Bus).unwrap();
        assert_eq!(above.viability.score, "Excellent");
        let at_lower = assess(2500.0, 1.0, 1.0, TransportMode::Bus).unwrap();
        assert_eq!(at_lower.viability.score, "Manageable");
        let below = assess(2499.0, 1.0, 1.0, TransportMode::Bus).unwrap();
        assert_eq!(below.viability.score, "Tight");
    }

    #[test]
    fn non_positive_inputs_are_rejected() {
        assert!(assess(0.0, 4.0, 2.0, TransportMode::Train).is_none());
        assert!(assess(25000.0, 0.0, 2.0, TransportMode::Train).is_none());
        assert!(assess(25000.0, 4.0, -1.0, TransportMode::Train).is_none());
    }

    #[test]
    fn confidence_rewards_clear_weather_and_covered_budget() {
        let plan = GeneratedPlan {
            total_estimated_cost: 20000.0,
            weather: WeatherInfo {
                condition: "Clear skies".to_string(),
                ..Default::default()
            },
            inputs: Some(sample_inputs("25000", TransportMode::Flight, "2025-06-10")),
            ..Default::default()
        };
        let report = confidence(&plan).expect("inputs echo present");
        // 100*0.3 + 100*0.3 + 90*0.2 + 100*0.2 = 98
        assert_eq!(report.total, 98);
        assert_eq!(report.factors.len(), 4);
        assert_eq!(report.factors[0].status, "Optimal");
        assert_eq!(report.factors[1].status, "Strong");
    }

    #[test]
    fn confidence_penalizes_monsoon_peak_and_overrun() {
        let plan = GeneratedPlan {
            total_estimated_cost: 50000.0,
            weather: WeatherInfo {
                condition: "Heavy monsoon rain".to_string(),
                ..Default::default()
            },
            inputs: Some(sample_inputs("25000", TransportMode::Bus, "2025-12-20")),
            ..Default::default()
        };
        let report = confidence(&plan).expect("inputs echo present");
        // 50*0.3 + 50*0.3 + 65*0.2 + 70*0.2 = 57
        assert_eq!(report.total, 57);
        assert_eq!(report.factors[2].status, "Moderate");
        assert_eq!(report.factors[3].status, "Standard");
    }

    #[test]
    fn confidence_requires_input_echo() {
        assert!(confidence(&GeneratedPlan::default()).is_none());
    }

    #[test]
    fn packing_follows_climate_and_category() {
        let mut plan = GeneratedPlan {
            weather: WeatherInfo {
                condition: "Cold and snowy".to_string(),
                ..Default::default()
            },
            inputs: Some(sample_inputs("25000", TransportMode::Train, "2025-01-05")),
            ..Default::default()
        };
        let list = packing_checklist(&plan).expect("inputs echo present");
        assert!(list.clothes.iter().any(|c| c.contains("woolens")));
        assert!(list.clothes.iter().any(|c| c == "5 pairs of socks/undergarments"));
        assert!(list.medicines.iter().any(|m| m.contains("Cold & cough")));
        assert!(list.essentials.iter().any(|e| e.contains("Shared travel documents")));

        plan.weather.condition = "Sunny beach weather".to_string();
        if let Some(inputs) = plan.inputs.as_mut() {
            inputs.destination_type = DestinationCategory::Adventure;
            inputs.persons = "1".to_string();
        }
        let list = packing_checklist(&plan).expect("inputs echo present");
        assert!(list.clothes.iter().any(|c| c.contains("Swimwear")));
        assert!(list.medicines.iter().any(|m| m.contains("Sunscreen")));
        assert!(list.essentials.iter().any(|e| e.contains("headlamp")));
        assert!(!list.essentials.iter().any(|e| e.contains("Shared travel documents")));
    }

    #[test]
    fn trade_off_wording_tracks_slider_sides() {
        assert_eq!(
            trade_off_feedback(100, 0),
            "Saving ₹5,000 saves 5 hours via direct transit with optimized neural routing."
        );
        assert_eq!(
            trade_off_feedback(0, 100),
            "Adding ₹5,000 for luxury adds 5 travel hours but increases scenic immersion."
        );
        assert_eq!(
            trade_off_feedback(50, 50),
            "Adding ₹0 for luxury saves 0 hours via direct transit with optimized neural routing."
        );
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(25000), "25,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
