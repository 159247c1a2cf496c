// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Module declarations
mod budget;
mod catalog;
mod db;
mod export;
mod gemini;
mod i18n;
mod models;
mod paths;
mod prompts;
mod session;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tauri::{command, Manager};

use i18n::Language;
use models::{
    Accommodation, Destination, DestinationCategory, GeneratedPlan, TransportMode, TripInputs,
    User,
};
use paths::{get_app_data_dir, get_visuals_dir};

// ============ App State ============

#[derive(Default)]
pub struct AppState {
    pub current_user: Mutex<Option<User>>,
}

// ============ App Configuration ============

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
}

fn load_app_config() -> Result<AppConfig, String> {
    let config_path = paths::get_app_config_path()?;
    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read app config: {}", e))?;
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse app config: {}", e))
    } else {
        Ok(AppConfig::default())
    }
}

fn save_app_config(config: &AppConfig) -> Result<(), String> {
    let config_path = paths::get_app_config_path()?;
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory: {}", e))?;
    }
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize app config: {}", e))?;
    std::fs::write(&config_path, content).map_err(|e| format!("Failed to save app config: {}", e))
}

// ============ Built-in API Key Support ============

/// XOR key for deobfuscation (must match build.rs)
const XOR_KEY: [u8; 16] = [
    0x57, 0x61, 0x79, 0x54, 0x72, 0x75, 0x73, 0x74, 0x4d, 0x6f, 0x6e, 0x73, 0x6f, 0x6f, 0x6e,
    0x21,
];

/// Compile-time embedded obfuscated API key (hex-encoded)
const OBFUSCATED_API_KEY: &str = env!("OBFUSCATED_API_KEY");

/// Whether a built-in API key was provided at compile time
const HAS_BUILTIN_KEY: &str = env!("HAS_BUILTIN_KEY");

/// Deobfuscate the hex-encoded XOR-obfuscated API key
fn deobfuscate_api_key(hex_encoded: &str) -> Option<String> {
    if hex_encoded.is_empty() {
        return None;
    }

    // Decode hex string to bytes
    let obfuscated: Vec<u8> = (0..hex_encoded.len())
        .step_by(2)
        .filter_map(|i| u8::from_str_radix(&hex_encoded[i..i + 2], 16).ok())
        .collect();

    if obfuscated.is_empty() {
        return None;
    }

    // XOR deobfuscate
    let deobfuscated: Vec<u8> = obfuscated
        .iter()
        .enumerate()
        .map(|(i, b)| b ^ XOR_KEY[i % XOR_KEY.len()])
        .collect();

    String::from_utf8(deobfuscated).ok()
}

/// Get the built-in API key if one was embedded at compile time
fn get_builtin_api_key() -> Option<String> {
    if HAS_BUILTIN_KEY == "1" {
        deobfuscate_api_key(OBFUSCATED_API_KEY)
    } else {
        None
    }
}

fn require_api_key() -> Result<String, String> {
    if let Some(builtin_key) = get_builtin_api_key() {
        return Ok(builtin_key);
    }
    let config = load_app_config()?;
    config
        .gemini_api_key
        .ok_or_else(|| "API key not configured".to_string())
}

// ============ Bootstrap Commands ============

#[derive(Serialize)]
pub struct InitStatus {
    pub ready: bool,
    pub message: String,
    pub data_path: String,
    pub has_session: bool,
    pub language: String,
}

#[command]
async fn init_app(state: tauri::State<'_, AppState>) -> Result<InitStatus, String> {
    let data_dir = get_app_data_dir()?;
    std::fs::create_dir_all(&data_dir)
        .map_err(|e| format!("Failed to create app data directory: {}", e))?;
    db::init_database()?;

    let user = session::load_user()?;
    let has_session = user.is_some();
    *state.current_user.lock().unwrap() = user;

    let language = i18n::load_language();
    info!("[init_app] Ready, session: {}, language: {}", has_session, language.code());

    Ok(InitStatus {
        ready: true,
        message: "WayTrust systems online".to_string(),
        data_path: data_dir.to_string_lossy().to_string(),
        has_session,
        language: language.code().to_string(),
    })
}

#[command]
async fn get_paths() -> Result<String, String> {
    let data_dir = get_app_data_dir()?;
    Ok(data_dir.to_string_lossy().to_string())
}

#[command]
fn clear_all_data(state: tauri::State<AppState>) -> Result<(), String> {
    paths::clear_app_data()?;
    *state.current_user.lock().unwrap() = None;
    info!("[clear_all_data] App data cleared");
    Ok(())
}

#[command]
fn log_from_frontend(level: String, message: String) {
    match level.as_str() {
        "error" => error!("[frontend] {}", message),
        "warn" => warn!("[frontend] {}", message),
        _ => info!("[frontend] {}", message),
    }
}

// ============ API Key Commands ============

#[command]
async fn save_api_key(key: String) -> Result<(), String> {
    info!("[save_api_key] Starting to save Gemini API key");
    let mut config = load_app_config()?;
    config.gemini_api_key = Some(key);
    save_app_config(&config)?;
    info!("[save_api_key] Gemini API key saved successfully");
    Ok(())
}

#[command]
async fn get_api_key() -> Result<Option<String>, String> {
    // First check for built-in key (compile-time embedded)
    if let Some(builtin_key) = get_builtin_api_key() {
        return Ok(Some(builtin_key));
    }
    // Fall back to user-configured key in app config
    let config = load_app_config()?;
    Ok(config.gemini_api_key)
}

#[command]
async fn has_api_key() -> Result<bool, String> {
    if get_builtin_api_key().is_some() {
        return Ok(true);
    }
    let config = load_app_config()?;
    Ok(config.gemini_api_key.is_some())
}

// ============ Session Commands ============

#[command]
fn login(
    state: tauri::State<AppState>,
    full_name: String,
    email: String,
    phone: String,
) -> Result<User, String> {
    session::validate_profile(&full_name, &email, &phone)?;
    let user = User {
        full_name,
        email,
        phone,
        saved_trips: Vec::new(),
        booked_accommodations: Vec::new(),
    };
    session::save_user(&user)?;
    *state.current_user.lock().unwrap() = Some(user.clone());
    info!("[login] Session opened for {}", user.email);
    Ok(user)
}

#[command]
fn current_user(state: tauri::State<AppState>) -> Result<Option<User>, String> {
    Ok(state.current_user.lock().unwrap().clone())
}

#[command]
fn update_profile(
    state: tauri::State<AppState>,
    full_name: String,
    email: String,
    phone: String,
) -> Result<User, String> {
    session::validate_profile(&full_name, &email, &phone)?;
    let mut guard = state.current_user.lock().unwrap();
    let user = guard.as_mut().ok_or_else(|| "No active session".to_string())?;
    user.full_name = full_name;
    user.email = email;
    user.phone = phone;
    session::save_user(user)?;
    Ok(user.clone())
}

#[command]
fn logout(state: tauri::State<AppState>) -> Result<(), String> {
    session::clear_user()?;
    *state.current_user.lock().unwrap() = None;
    info!("[logout] Session closed");
    Ok(())
}

// ============ Saved Trips & Bookings ============

#[command]
fn save_trip(state: tauri::State<AppState>, plan: GeneratedPlan) -> Result<User, String> {
    let mut guard = state.current_user.lock().unwrap();
    let user = guard.as_mut().ok_or_else(|| "No active session".to_string())?;
    if session::save_trip(user, plan) {
        session::save_user(user)?;
    }
    Ok(user.clone())
}

#[command]
fn delete_trip(state: tauri::State<AppState>, id: String) -> Result<User, String> {
    let mut guard = state.current_user.lock().unwrap();
    let user = guard.as_mut().ok_or_else(|| "No active session".to_string())?;
    session::delete_trip(user, &id);
    session::save_user(user)?;
    Ok(user.clone())
}

#[command]
fn book_accommodation(
    state: tauri::State<AppState>,
    plan: GeneratedPlan,
    accommodation: Accommodation,
) -> Result<User, String> {
    let mut guard = state.current_user.lock().unwrap();
    let user = guard.as_mut().ok_or_else(|| "No active session".to_string())?;
    let booking = session::book_accommodation(user, &plan, accommodation);
    session::save_user(user)?;
    info!(
        "[book_accommodation] Booked {} in {} ({})",
        booking.accommodation.name, booking.destination, booking.id
    );
    Ok(user.clone())
}

#[command]
fn delete_booking(state: tauri::State<AppState>, id: String) -> Result<User, String> {
    let mut guard = state.current_user.lock().unwrap();
    let user = guard.as_mut().ok_or_else(|| "No active session".to_string())?;
    session::delete_booking(user, &id);
    session::save_user(user)?;
    Ok(user.clone())
}

// ============ Localization Commands ============

#[command]
fn get_language() -> String {
    i18n::load_language().code().to_string()
}

#[command]
fn set_language(code: String) -> Result<(), String> {
    let language =
        Language::from_code(&code).ok_or_else(|| format!("Unknown language code: {}", code))?;
    i18n::save_language(language)
}

#[command]
fn translate(path: String) -> String {
    i18n::translate(i18n::load_language(), &path)
}

#[command]
fn get_translations() -> Value {
    i18n::table(i18n::load_language()).clone()
}

// ============ Destination Catalog Commands ============

#[command]
fn list_destinations(category: DestinationCategory) -> Vec<Destination> {
    catalog::by_category(category)
}

#[command]
fn prefill_plan(destination: String, date: String) -> Result<TripInputs, String> {
    let entry = catalog::find_by_name(&destination)
        .ok_or_else(|| format!("Unknown destination: {}", destination))?;
    Ok(catalog::prefill_inputs(entry, &date))
}

// ============ Budget & Analytics Commands ============

#[command]
fn budget_breakdown(
    budget: String,
    duration: String,
    persons: String,
    transport: TransportMode,
) -> Result<budget::BudgetReport, String> {
    let budget: f64 = budget.trim().parse().unwrap_or(0.0);
    let duration: f64 = duration.trim().parse().unwrap_or(0.0);
    let persons: f64 = persons.trim().parse().unwrap_or(0.0);
    budget::assess(budget, duration, persons, transport)
        .ok_or_else(|| "Budget, duration and persons must all be positive".to_string())
}

#[command]
fn trip_confidence(plan: GeneratedPlan) -> Result<budget::ConfidenceReport, String> {
    budget::confidence(&plan).ok_or_else(|| "Plan carries no trip inputs".to_string())
}

#[command]
fn packing_checklist(plan: GeneratedPlan) -> Result<budget::PackingChecklist, String> {
    budget::packing_checklist(&plan).ok_or_else(|| "Plan carries no trip inputs".to_string())
}

#[command]
fn trade_off_feedback(comfort: i64, pacing: i64) -> String {
    budget::trade_off_feedback(comfort, pacing)
}

// ============ Plan Synthesis ============

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

// Monotonic ticket so a superseded request's late response cannot win
static PLAN_REQUEST_SEQ: AtomicU64 = AtomicU64::new(0);

#[command]
async fn generate_plan(
    inputs: TripInputs,
    coords: Option<Coordinates>,
) -> Result<GeneratedPlan, String> {
    let ticket = PLAN_REQUEST_SEQ.fetch_add(1, Ordering::SeqCst) + 1;
    info!(
        "[generate_plan] Request {} for '{}' ({} days)",
        ticket, inputs.target_destination, inputs.duration
    );

    let api_key = require_api_key()?;
    let language = i18n::load_language();
    let prompt = prompts::build_plan_prompt(&inputs, language.code());

    let mut body = gemini::text_request(&prompt);
    body["tools"] = json!([{ "googleMaps": {} }, { "googleSearch": {} }]);
    if let Some(coords) = coords {
        body["toolConfig"] = json!({
            "retrievalConfig": {
                "latLng": { "latitude": coords.lat, "longitude": coords.lng }
            }
        });
    }

    let response = gemini::generate_content(&api_key, gemini::PLAN_MODEL, &body).await?;

    if PLAN_REQUEST_SEQ.load(Ordering::SeqCst) != ticket {
        warn!("[generate_plan] Request {} superseded, discarding response", ticket);
        return Err("Plan request superseded by a newer one".to_string());
    }

    let text = gemini::response_text(&response).unwrap_or_default();
    let json_block = gemini::extract_json_block(&text)
        .ok_or_else(|| "Model reply did not contain a plan".to_string())?;
    let mut plan: GeneratedPlan = serde_json::from_str(&json_block)
        .map_err(|e| format!("Failed to parse plan JSON: {}", e))?;

    plan.id = session::random_id();
    plan.timestamp = session::now_millis();
    plan.sources = gemini::grounding_sources(&response);
    plan.inputs = Some(inputs);

    info!("[generate_plan] Synthesized plan {} for {}", plan.id, plan.destination);
    Ok(plan)
}

// ============ Location Assists ============

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LocationSuggestion {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[command]
async fn suggest_locations(query: String) -> Result<Vec<LocationSuggestion>, String> {
    let query = query.trim().to_string();
    if query.len() < 3 {
        return Ok(Vec::new());
    }

    let api_key = require_api_key()?;
    let language = i18n::load_language();
    let mut body = gemini::text_request(&prompts::build_suggestion_prompt(&query, language.code()));
    body["generationConfig"] = json!({
        "responseMimeType": "application/json",
        "responseSchema": {
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING" },
                    "description": { "type": "STRING" }
                },
                "required": ["name", "description"]
            }
        }
    });

    let response = gemini::generate_content(&api_key, gemini::FAST_MODEL, &body).await?;
    let text = gemini::response_text(&response).unwrap_or_default();
    serde_json::from_str(text.trim()).map_err(|e| format!("Failed to parse suggestions: {}", e))
}

#[command]
async fn detect_location(latitude: f64, longitude: f64) -> Result<String, String> {
    // Geolocation is best-effort: any failure degrades to raw coordinates
    let fallback = format!("{:.2}, {:.2}", latitude, longitude);

    let api_key = match require_api_key() {
        Ok(key) => key,
        Err(_) => return Ok(fallback),
    };

    let mut body = gemini::text_request(&prompts::build_geocode_prompt(latitude, longitude));
    body["systemInstruction"] = json!({ "parts": [{ "text": prompts::GEOCODE_SYSTEM_PROMPT }] });

    match gemini::generate_content(&api_key, gemini::FAST_MODEL, &body).await {
        Ok(response) => Ok(gemini::response_text(&response)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or(fallback)),
        Err(e) => {
            warn!("[detect_location] Reverse geocode failed: {}", e);
            Ok(fallback)
        }
    }
}

// ============ Landmark Visualiser ============

#[derive(Serialize)]
pub struct LandmarkVisual {
    pub image_base64: String,
    pub cached_path: String,
}

#[command]
async fn visualise_landmark(name: String, landscape: bool) -> Result<LandmarkVisual, String> {
    info!("[visualise_landmark] Rendering '{}'", name);
    let api_key = require_api_key()?;
    let body = gemini::text_request(&prompts::build_landmark_prompt(&name, landscape));
    let response = gemini::generate_content(&api_key, gemini::IMAGE_MODEL, &body).await?;

    let data = gemini::inline_image_data(&response)
        .ok_or_else(|| "Model returned no image".to_string())?;
    let bytes = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, &data)
        .map_err(|e| format!("Failed to decode image: {}", e))?;

    let visuals_dir = get_visuals_dir()?;
    std::fs::create_dir_all(&visuals_dir)
        .map_err(|e| format!("Failed to create directory: {}", e))?;
    let file_stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let cached_path = visuals_dir.join(format!("{}.png", file_stem));
    std::fs::write(&cached_path, &bytes)
        .map_err(|e| format!("Failed to cache image: {}", e))?;

    Ok(LandmarkVisual {
        image_base64: data,
        cached_path: cached_path.to_string_lossy().to_string(),
    })
}

// ============ Travel Buddy Commands ============

#[command]
async fn send_buddy_message(message: String) -> Result<String, String> {
    let message = message.trim().to_string();
    if message.is_empty() {
        return Err("Message is empty".to_string());
    }

    let api_key = require_api_key()?;
    let history = db::get_buddy_history(20)?;

    let mut contents: Vec<Value> = Vec::new();
    for msg in &history {
        contents.push(json!({
            "role": msg.role,
            "parts": [{ "text": msg.content }]
        }));
    }
    contents.push(json!({
        "role": "user",
        "parts": [{ "text": message }]
    }));

    let mut body = json!({ "contents": contents });
    body["systemInstruction"] = json!({ "parts": [{ "text": prompts::BUDDY_SYSTEM_PROMPT }] });
    // Low temperature for high accuracy/consistency
    body["generationConfig"] = json!({ "temperature": 0.1 });

    let response = gemini::generate_content(&api_key, gemini::FAST_MODEL, &body).await?;
    let reply = gemini::response_text(&response)
        .unwrap_or_else(|| "Error: Neural sync failed.".to_string());

    let timestamp = chrono::Utc::now().to_rfc3339();
    db::store_buddy_message(&timestamp, "user", &message)?;
    db::store_buddy_message(&timestamp, "model", &reply)?;

    Ok(reply)
}

#[command]
async fn get_buddy_history(limit: i64) -> Result<Vec<models::BuddyMessage>, String> {
    let history = db::get_buddy_history(limit)?;
    if history.is_empty() {
        return Ok(vec![models::BuddyMessage {
            id: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
            role: "model".to_string(),
            content: prompts::BUDDY_GREETING.to_string(),
        }]);
    }
    Ok(history)
}

#[command]
async fn clear_buddy_history() -> Result<(), String> {
    db::clear_buddy_history()
}

// ============ Export Commands ============

#[command]
async fn export_plan_package(plan: GeneratedPlan) -> Result<String, String> {
    let path = export::export_plan(&plan).await?;
    info!("[export_plan_package] Wrote {}", path.to_string_lossy());
    Ok(path.to_string_lossy().to_string())
}

#[command]
async fn export_offline_pack(plan: GeneratedPlan) -> Result<String, String> {
    let path = export::export_offline_pack(&plan).await?;
    info!("[export_offline_pack] Wrote {}", path.to_string_lossy());
    Ok(path.to_string_lossy().to_string())
}

#[command]
fn directions_url(plan: GeneratedPlan) -> String {
    export::directions_url(&plan)
}

// ============ Main ============

fn main() {
    tauri::Builder::default()
        .manage(AppState::default())
        .plugin(tauri_plugin_dialog::init())
        .plugin(
            tauri_plugin_log::Builder::new()
                .target(tauri_plugin_log::Target::new(
                    tauri_plugin_log::TargetKind::LogDir {
                        file_name: Some("waytrust.log".into()),
                    },
                ))
                .level(log::LevelFilter::Info)
                .build(),
        )
        .setup(|app| {
            info!("=== WayTrust Desktop Starting ===");
            if let Ok(data_dir) = get_app_data_dir() {
                info!("[startup] Data directory: {:?}", data_dir);
                info!("[startup] Data directory exists: {}", data_dir.exists());
            }

            // Hydrate the session once at startup; commands read from state
            match session::load_user() {
                Ok(Some(user)) => {
                    info!("[startup] Restored session for {}", user.email);
                    *app.state::<AppState>().current_user.lock().unwrap() = Some(user);
                }
                Ok(None) => info!("[startup] No active session"),
                Err(e) => warn!("[startup] Could not restore session: {}", e),
            }
            info!("[startup] Language: {}", i18n::load_language().code());

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            init_app,
            get_paths,
            clear_all_data,
            log_from_frontend,
            save_api_key,
            get_api_key,
            has_api_key,
            login,
            current_user,
            update_profile,
            logout,
            save_trip,
            delete_trip,
            book_accommodation,
            delete_booking,
            get_language,
            set_language,
            translate,
            get_translations,
            list_destinations,
            prefill_plan,
            budget_breakdown,
            trip_confidence,
            packing_checklist,
            trade_off_feedback,
            generate_plan,
            suggest_locations,
            detect_location,
            visualise_landmark,
            send_buddy_message,
            get_buddy_history,
            clear_buddy_history,
            export_plan_package,
            export_offline_pack,
            directions_url,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
