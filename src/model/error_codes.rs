// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mower error code table.

/// Error texts published for mower error codes.
const ERROR_CODES: &[(u32, &str)] = &[
    (0, "Unexpected error"),
    (1, "Outside working area"),
    (2, "No loop signal"),
    (3, "Wrong loop signal"),
    (4, "Loop sensor problem, front"),
    (5, "Loop sensor problem, rear"),
    (6, "Loop sensor problem, left"),
    (7, "Loop sensor problem, right"),
    (8, "Wrong PIN code"),
    (9, "Trapped"),
    (10, "Upside down"),
    (11, "Low battery"),
    (12, "Empty battery"),
    (13, "No drive"),
    (14, "Mower lifted"),
    (15, "Lifted"),
    (16, "Stuck in charging station"),
    (17, "Charging station blocked"),
    (18, "Collision sensor problem, rear"),
    (19, "Collision sensor problem, front"),
    (20, "Wheel motor blocked, right"),
    (21, "Wheel motor blocked, left"),
    (22, "Wheel drive problem, right"),
    (23, "Wheel drive problem, left"),
    (24, "Cutting system blocked"),
    (25, "Cutting system blocked"),
    (26, "Invalid sub-device combination"),
    (27, "Settings restored"),
    (28, "Memory circuit problem"),
    (29, "Slope too steep"),
    (30, "Charging system problem"),
    (31, "STOP button problem"),
    (32, "Tilt sensor problem"),
    (33, "Mower tilted"),
    (34, "Cutting stopped - slope too steep"),
    (35, "Wheel motor overloaded, right"),
    (36, "Wheel motor overloaded, left"),
    (37, "Charging current too high"),
    (38, "Electronic problem"),
    (39, "Cutting motor problem"),
    (40, "Limited cutting height range"),
    (41, "Unexpected cutting height adj"),
    (42, "Limited cutting height range"),
    (43, "Cutting height problem, drive"),
    (44, "Cutting height problem, curr"),
    (45, "Cutting height problem, dir"),
    (46, "Cutting height blocked"),
    (47, "Cutting height problem"),
    (48, "No response from charger"),
    (49, "Ultrasonic problem"),
    (50, "Guide 1 not found"),
    (51, "Guide 2 not found"),
    (52, "Guide 3 not found"),
    (53, "GPS navigation problem"),
    (54, "Weak GPS signal"),
    (55, "Difficult finding home"),
    (56, "Guide calibration accomplished"),
    (57, "Guide calibration failed"),
    (58, "Temporary battery problem"),
    (59, "Temporary battery problem"),
    (60, "Temporary battery problem"),
    (61, "Temporary battery problem"),
    (62, "Battery restriction due to ambient temperature"),
    (63, "Temporary battery problem"),
    (64, "Temporary battery problem"),
    (65, "Temporary battery problem"),
    (66, "Battery problem"),
    (67, "Battery problem"),
    (68, "Temporary battery problem"),
    (69, "Alarm! Mower switched off"),
    (70, "Alarm! Mower stopped"),
    (71, "Alarm! Mower lifted"),
    (72, "Alarm! Mower tilted"),
    (73, "Alarm! Mower in motion"),
    (74, "Alarm! Outside geofence"),
    (75, "Connection changed"),
    (76, "Connection NOT changed"),
    (77, "Com board not available"),
    (78, "Slipped - Mower has Slipped.Situation not solved with moving pattern"),
    (79, "Invalid battery combination - Invalid combination of different battery types."),
    (80, "Cutting system imbalance    Warning"),
    (81, "Safety function faulty"),
    (82, "Wheel motor blocked, rear right"),
    (83, "Wheel motor blocked, rear left"),
    (84, "Wheel drive problem, rear right"),
    (85, "Wheel drive problem, rear left"),
    (86, "Wheel motor overloaded, rear right"),
    (87, "Wheel motor overloaded, rear left"),
    (88, "Angular sensor problem"),
    (89, "Invalid system configuration"),
    (90, "No power in charging station"),
    (91, "Switch cord problem"),
    (92, "Work area not valid"),
    (93, "No accurate position from satellites"),
    (94, "Reference station communication problem"),
    (95, "Folding sensor activated"),
    (96, "Right brush motor overloaded"),
    (97, "Left brush motor overloaded"),
    (98, "Ultrasonic Sensor 1 defect"),
    (99, "Ultrasonic Sensor 2 defect"),
    (100, "Ultrasonic Sensor 3 defect"),
    (101, "Ultrasonic Sensor 4 defect"),
    (102, "Cutting drive motor 1 defect"),
    (103, "Cutting drive motor 2 defect"),
    (104, "Cutting drive motor 3 defect"),
    (105, "Lift Sensor defect"),
    (106, "Collision sensor defect"),
    (107, "Docking sensor defect"),
    (108, "Folding cutting deck sensor defect"),
    (109, "Loop sensor defect"),
    (110, "Collision sensor error"),
    (111, "No confirmed position"),
    (112, "Cutting system major imbalance"),
    (113, "Complex working area"),
    (114, "Too high discharge current"),
    (115, "Too high internal current"),
    (116, "High charging power loss"),
    (117, "High internal power loss"),
    (118, "Charging system problem"),
    (119, "Zone generator problem"),
    (120, "Internal voltage error"),
    (121, "High internal temperature"),
    (122, "CAN error"),
    (123, "Destination not reachable"),
    (701, "Connectivity problem"),
    (702, "Connectivity settings restored"),
    (703, "Connectivity problem"),
    (704, "Connectivity problem"),
    (705, "Connectivity problem"),
    (706, "Poor signal quality"),
    (707, "SIM card requires PIN"),
    (708, "SIM card locked"),
    (709, "SIM card not found"),
    (710, "SIM card locked"),
    (711, "SIM card locked"),
    (712, "SIM card locked"),
    (713, "Geofence problem"),
    (714, "Geofence problem"),
    (715, "Connectivity problem"),
    (716, "Connectivity problem"),
    (717, "SMS could not be sent"),
    (724, "Communication circuit board SW must be updated"),
];

/// Returns the published text for an error code.
#[must_use]
pub fn error_text(code: u32) -> Option<&'static str> {
    ERROR_CODES
        .binary_search_by_key(&code, |(c, _)| *c)
        .ok()
        .map(|i| ERROR_CODES[i].1)
}

/// Returns a stable snake_case key for an error code.
///
/// Code `0` means "no error" and yields `None`, as do unpublished codes.
#[must_use]
pub fn error_key(code: u32) -> Option<String> {
    if code == 0 {
        return None;
    }
    error_text(code).map(snake_case)
}

/// Returns every error key, sorted and without duplicates.
#[must_use]
pub fn error_keys() -> Vec<String> {
    let mut keys: Vec<String> = ERROR_CODES.iter().map(|(_, text)| snake_case(text)).collect();
    keys.sort();
    keys.dedup();
    keys
}

fn snake_case(text: &str) -> String {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_for_lookup() {
        assert!(ERROR_CODES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn keys_are_snake_case() {
        assert_eq!(error_key(4).as_deref(), Some("loop_sensor_problem_front"));
        assert_eq!(error_key(69).as_deref(), Some("alarm_mower_switched_off"));
        assert_eq!(error_key(707).as_deref(), Some("sim_card_requires_pin"));
        assert_eq!(
            error_key(80).as_deref(),
            Some("cutting_system_imbalance_warning")
        );
    }

    #[test]
    fn no_error_and_unknown_codes() {
        assert!(error_key(0).is_none());
        assert!(error_key(999).is_none());
        assert_eq!(error_text(0), Some("Unexpected error"));
    }

    #[test]
    fn key_list_has_no_duplicates() {
        let keys = error_keys();
        assert!(keys.contains(&"temporary_battery_problem".to_string()));
        assert_eq!(
            keys.iter().filter(|k| *k == "temporary_battery_problem").count(),
            1
        );
    }
}
