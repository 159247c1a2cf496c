//! Prompt templates and builders for the generative-model calls

use crate::models::TripInputs;

/// System prompt for the travel-buddy assistant
pub const BUDDY_SYSTEM_PROMPT: &str = "You are the WayTrust AI Travel Buddy. \n\
STRICT RULES:\n\
1. Be extremely short and accurate. \n\
2. No conversational filler or \"helpful\" introductions.\n\
3. Provide direct facts, safety warnings, or activity names.\n\
4. Maximum 50 words per response.\n\
5. Use bullet points for lists.\n\
6. Focus: Indian travel, safety, hidden gems, and logistics.";

/// System prompt for reverse geocoding
pub const GEOCODE_SYSTEM_PROMPT: &str = "Respond with 'City, State' only.";

/// Opening line of the travel-buddy conversation
pub const BUDDY_GREETING: &str =
    "Neural link active. I provide short, accurate Indian travel intel. How can I assist?";

pub fn build_geocode_prompt(latitude: f64, longitude: f64) -> String {
    format!("Reverse geocode {}, {} to a city in India.", latitude, longitude)
}

pub fn build_suggestion_prompt(query: &str, language: &str) -> String {
    format!(
        "List 5 popular travel locations in India matching \"{}\". Return as JSON array of objects with 'name' and 'description'. Respond in {}.",
        query, language
    )
}

/// Prompt for the landmark visualiser. Catalog destinations get the wide
/// landscape treatment, plan attractions a closer local framing.
pub fn build_landmark_prompt(name: &str, landscape: bool) -> String {
    if landscape {
        format!(
            "A cinematic high-fidelity landscape photograph of {}, India. Professional travel photography showcasing iconic views.",
            name
        )
    } else {
        format!(
            "A cinematic high-fidelity photograph of {} in its local setting. Professional travel photography.",
            name
        )
    }
}

/// Builds the single large plan-synthesis prompt, embedding the trip
/// parameters and the required fenced-JSON response shape.
pub fn build_plan_prompt(inputs: &TripInputs, language: &str) -> String {
    let target = if inputs.target_destination.is_empty() {
        format!("a {} destination", inputs.destination_type)
    } else {
        inputs.target_destination.clone()
    };

    let village_block = if inputs.village_friendly_mode {
        format!(
            "\nVILLAGE LOGIC REQUIREMENTS:\n\
1. Assume limited transport from {location}.\n\
2. Plan realistic routes: Walk -> Shared Auto -> Local Bus -> Train.\n\
3. Identify the nearest railway station to {location} and distance.\n\
4. Use local timings: Morning buses start 6:00-7:00 AM; evening transport ends early.\n\
5. Add 45-60 min buffer time between rural segments.\n\
6. Avoid \"Google-ideal\" direct routes; stick to high-frequency village routes.\n",
            location = inputs.location
        )
    } else {
        String::new()
    };

    format!(
        r#"Act as a WayTrust Smart Travel Agent.
Mission: Synthesize a {duration}-day trip starting on {date} from {location} to {target} for {persons} people.
Mood: {mood}. Adjust pace and activities to reflect this mood.
Budget: ₹{budget}. Transport Mode: {transport}.
Essence: {category}.
Language: All output in {language}.

CRITICAL: Provide accommodation and transportation options that are strictly specific and likely available for the chosen start date: {date}.

INTELLIGENCE PROFILE ROLE:
Generate destination-specific information for {target} in India.
1. BEST TIME TO VISIT: month-wise guidance using labels [Best, Okay, Avoid] with brief factors.
2. NETWORK AVAILABILITY: [Good, Average, Poor], mention Indian providers and internet reliability.
3. DIFFICULTY LEVEL: Choose exactly one from [Easy, Moderate, Hard] with one short explanatory line.
4. PROS & CONS: Exactly 3 Pros and 3 Cons, short and practical.
5. MOST FORGOTTEN ITEMS: Exactly 5 items relevant to {target} for Indian travelers.

VILLAGE-FRIENDLY MODE IS {village_state}.
{village_block}
REQUIRED JSON STRUCTURE (Use ```json tags):
{{
  "destination": "Specific City Name",
  "totalEstimatedCost": number,
  "transitSummary": "Overview of travel logistics",
  "transportOptions": [{{"name": "Specific Train/Flight/Bus", "details": "Carrier details", "schedule": "Specific timing for {date}", "priceEst": "₹Cost"}}],
  "weather": {{"temperature": "string", "condition": "string", "suggestion": "Travel clothing/activity logic for the season of {date}"}},
  "accommodations": [{{"name": "Hotel Name", "type": "Luxury/Mid-range/Budget", "pricePerNight": number, "contactInfo": "URL or Phone", "description": "Availability note for {date}"}}],
  "itinerary": [{{"day": number, "theme": string, "morning": string, "afternoon": string, "evening": string, "estimatedCost": number, "foodHighlight": string}}],
  "sightseeing": [{{"name": "Landmark Name", "description": "Bio", "searchQuery": "string"}}],
  "localCulture": "Detailed description of local heritage, traditions, and culture",
  "foodSpecialties": ["Dish 1", "Dish 2", "Dish 3"],
  "culinaryStrategy": "Brief gastronomy overview based on {food}",
  "travelTips": ["string"],
  "emergencyContacts": [{{"category": "string", "name": "string", "contact": "string"}}],
  "localPhrases": [{{"english": "string", "local": "string", "phonetic": "string"}}],
  "offlineFoodRecommendations": [{{"dish": "string", "placeType": "string", "priceRange": "string"}}],
  "mapGuide": [{{"instruction": "string", "landmark": "string"}}],
  "villageDetails": {{
     "stepByStepPath": ["string"],
     "transportSequence": "string",
     "nearestStation": "string",
     "localTimings": "string",
     "practicalNotes": ["string"]
  }},
  "intelligence": {{
    "bestTimeToVisit": "string (plain text guidance)",
    "networkAvailability": "string (plain text guidance)",
    "difficultyLevel": {{ "label": "Easy/Moderate/Hard", "explanation": "string" }},
    "prosAndCons": {{ "pros": ["string"], "cons": ["string"] }},
    "mostForgottenItems": ["string"]
  }}
}}"#,
        duration = inputs.duration,
        date = inputs.departure_date,
        location = inputs.location,
        target = target,
        persons = inputs.persons,
        mood = inputs.mood,
        budget = inputs.budget,
        transport = inputs.transport,
        category = inputs.destination_type,
        language = language,
        village_state = if inputs.village_friendly_mode { "ENABLED" } else { "DISABLED" },
        village_block = village_block,
        food = inputs.food_preference,
    )
}
