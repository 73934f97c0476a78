use cityhub_domain::spot::{ParkingSpot, SpotStatus, VehicleType};
use cityhub_lot::LotStats;

pub const SYSTEM_INSTRUCTION_MANAGER: &str = "\
You are an expert Parking Management Consultant AI.
Your goal is to analyze real-time parking data to reduce traffic congestion, optimize revenue, and improve space utilization.
Provide actionable insights based on the provided JSON statistics.
Keep responses concise, professional, and data-driven.";

pub const SYSTEM_INSTRUCTION_DRIVER: &str = "\
You are a helpful Smart Parking Assistant for drivers.
Your goal is to help them find a parking spot quickly to save time and fuel.
You have access to the current parking layout.
If a user asks for a spot, suggest specific section/ID based on availability.
Be friendly and brief.";

fn vehicle_label(vehicle: VehicleType) -> &'static str {
    match vehicle {
        VehicleType::Compact => "COMPACT",
        VehicleType::Suv => "SUV",
        VehicleType::Handicap => "HANDICAP",
        VehicleType::Ev => "EV",
    }
}

/// Driver query plus a summary of what is actually free right now.
pub fn driver_prompt(query: &str, spots: &[ParkingSpot]) -> String {
    let available: Vec<&ParkingSpot> = spots
        .iter()
        .filter(|s| s.status == SpotStatus::Available)
        .collect();

    let summary = if available.is_empty() {
        "No spots currently available.".to_string()
    } else {
        available
            .iter()
            .map(|s| format!("{}-{} ({})", s.section, s.id, vehicle_label(s.vehicle_type)))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "User Query: \"{}\"\n\nContext - Currently Available Spots:\n{}\n\nTotal Available: {}",
        query,
        summary,
        available.len()
    )
}

/// Lot statistics serialized for the consultant persona.
pub fn manager_prompt(stats: &LotStats) -> String {
    let data = serde_json::to_string_pretty(stats).unwrap_or_else(|_| "{}".to_string());
    format!(
        "Analyze the following parking statistics and suggest improvements for:\n\
         1. Reducing congestion\n\
         2. Dynamic pricing opportunities\n\
         3. Space utilization\n\n\
         Current Data:\n{}",
        data
    )
}
