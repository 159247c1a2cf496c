//! Data models and structures used throughout the application

use serde::{Deserialize, Serialize};

/// How the traveler intends to cover the main leg of the trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportMode {
    Car,
    Bus,
    Train,
    Flight,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransportMode::Car => "Car",
            TransportMode::Bus => "Bus",
            TransportMode::Train => "Train",
            TransportMode::Flight => "Flight",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestinationCategory {
    Beach,
    #[serde(rename = "Hill Station")]
    HillStation,
    Heritage,
    Spiritual,
    Adventure,
    #[serde(rename = "City Break")]
    CityBreak,
    Any,
}

impl std::fmt::Display for DestinationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DestinationCategory::Beach => "Beach",
            DestinationCategory::HillStation => "Hill Station",
            DestinationCategory::Heritage => "Heritage",
            DestinationCategory::Spiritual => "Spiritual",
            DestinationCategory::Adventure => "Adventure",
            DestinationCategory::CityBreak => "City Break",
            DestinationCategory::Any => "Any",
        };
        write!(f, "{}", label)
    }
}

/// Raw trip parameters captured by the planner form. Numeric fields stay
/// strings and are parsed where needed, matching the form inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripInputs {
    pub budget: String,
    pub duration: String,
    pub persons: String,
    pub location: String,
    pub departure_date: String,
    pub transport: TransportMode,
    pub destination_type: DestinationCategory,
    pub target_destination: String,
    pub food_preference: String,
    pub mood: String,
    pub village_friendly_mode: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItineraryDay {
    pub day: u32,
    pub morning: String,
    pub afternoon: String,
    pub evening: String,
    pub estimated_cost: f64,
    pub theme: String,
    pub food_highlight: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherInfo {
    pub temperature: String,
    pub condition: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attraction {
    pub name: String,
    pub description: String,
    pub search_query: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Accommodation {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price_per_night: f64,
    pub contact_info: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransportOption {
    pub name: String,
    pub details: String,
    pub schedule: String,
    pub price_est: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Citation returned alongside a grounded model response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmergencyContact {
    pub category: String,
    pub name: String,
    pub contact: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalPhrase {
    pub english: String,
    pub local: String,
    pub phonetic: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FoodRecommendation {
    pub dish: String,
    pub place_type: String,
    pub price_range: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapInstruction {
    pub instruction: String,
    pub landmark: String,
}

/// Realistic low-frequency transit guidance returned when village-friendly
/// mode is enabled
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VillageDetails {
    pub step_by_step_path: Vec<String>,
    pub transport_sequence: String,
    pub nearest_station: String,
    pub local_timings: String,
    pub practical_notes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyLevel {
    pub label: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProsAndCons {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DestinationIntelligence {
    pub best_time_to_visit: String,
    pub network_availability: String,
    pub difficulty_level: DifficultyLevel,
    pub pros_and_cons: ProsAndCons,
    pub most_forgotten_items: Vec<String>,
}

/// Full itinerary aggregate parsed from one model response. `id`,
/// `timestamp`, `sources` and the `inputs` echo are attached locally after
/// a successful parse; the plan is never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedPlan {
    pub id: String,
    pub timestamp: i64,
    pub destination: String,
    pub total_estimated_cost: f64,
    pub itinerary: Vec<ItineraryDay>,
    pub travel_tips: Vec<String>,
    pub viability_message: String,
    pub weather: WeatherInfo,
    pub sources: Vec<GroundingSource>,
    pub sightseeing: Vec<Attraction>,
    pub accommodations: Vec<Accommodation>,
    pub transport_options: Vec<TransportOption>,
    pub transit_summary: String,
    pub eco_impact: String,
    pub local_culture: String,
    pub food_specialties: Vec<String>,
    pub culinary_strategy: String,
    pub inputs: Option<TripInputs>,
    pub emergency_contacts: Vec<EmergencyContact>,
    pub local_phrases: Vec<LocalPhrase>,
    pub offline_food_recommendations: Vec<FoodRecommendation>,
    pub map_guide: Vec<MapInstruction>,
    pub village_details: Option<VillageDetails>,
    pub intelligence: Option<DestinationIntelligence>,
}

/// An accommodation the user booked from a plan, with the destination name
/// denormalized at booking time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedAccommodation {
    #[serde(flatten)]
    pub accommodation: Accommodation,
    pub id: String,
    pub booking_date: i64,
    pub destination: String,
}

/// The persisted user record. The whole object is the unit of persistence:
/// every mutation rewrites the serialized blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub saved_trips: Vec<GeneratedPlan>,
    #[serde(default)]
    pub booked_accommodations: Vec<BookedAccommodation>,
}

/// Static catalog entry used to seed the recommendation grids
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub base_cost: f64,
    #[serde(rename = "type")]
    pub kind: DestinationCategory,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub transport: f64,
    pub stay: f64,
    pub food: f64,
    pub activities: f64,
}

/// Represents a single travel-buddy message stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuddyMessage {
    pub id: Option<i64>,
    pub timestamp: String,
    pub role: String,
    pub content: String,
}
