use chrono::NaiveDate;

/// Display names for the programme's exercise catalogue. Unknown keys fall
/// back to a generic underscores-to-title-case transform.
pub fn exercise_name(key: &str) -> String {
    let known = match key {
        "wrist_heel_raises" => Some("Wrist Heel Raises"),
        "fin_pushups" => Some("Fingertip Push-ups"),
        "desk_stretch_ext" => Some("Desk Wrist Stretch (Ext)"),
        "overhead_desk" => Some("Overhead Desk Stretch"),
        "hang" => Some("Dead Hang"),
        "protracted_plank" => Some("Protracted Plank"),
        "body_line_drill" => Some("Body Line Drill"),
        "wrist_fin_2" | "wrist_fin_3" | "wrist_fin_4" | "wrist_fin_5" => {
            Some("Wrist & Finger Work")
        }
        "desk_hang_2" | "desk_hang_3" | "desk_hang_4" | "desk_hang_5" => {
            Some("Desk & Hang Combo")
        }
        "chest_to_wall" | "ctw_3" | "ctw_4" | "ctw_5" => Some("Chest-to-Wall HS"),
        "hollow_body" => Some("Hollow Body Hold"),
        "heel_pulls" => Some("Heel Pulls"),
        "toe_pulls" => Some("Toe Pulls"),
        "box_balance" => Some("Box Balance"),
        "balance_game_15" => Some("Balance Game (15s)"),
        "kickup" => Some("Kick-up Practice"),
        "kickup_5" => Some("Kick-up + Hold"),
        "shoulder_tap" => Some("Shoulder Taps"),
        "freestanding" => Some("Freestanding Handstand"),
        _ => None,
    };

    match known {
        Some(name) => name.to_string(),
        None => key
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Hold times render as "45s", "2m" or "2m 5s". Zero or missing holds render
/// as nothing at all, never as "0s".
pub fn format_hold(seconds: Option<i64>) -> Option<String> {
    let secs = seconds?;
    if secs <= 0 {
        return None;
    }
    if secs < 60 {
        return Some(format!("{secs}s"));
    }
    let minutes = secs / 60;
    let rest = secs % 60;
    if rest == 0 {
        Some(format!("{minutes}m"))
    } else {
        Some(format!("{minutes}m {rest}s"))
    }
}

/// Long form, day before month: "3 Feb 2026".
pub fn long_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Short form for timeline labels: "Feb 2026".
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_use_the_catalogue() {
        assert_eq!(exercise_name("hang"), "Dead Hang");
        assert_eq!(exercise_name("ctw_4"), "Chest-to-Wall HS");
    }

    #[test]
    fn unknown_keys_fall_back_to_title_case() {
        assert_eq!(exercise_name("one_arm_work"), "One Arm Work");
        assert_eq!(exercise_name("planche"), "Planche");
    }

    #[test]
    fn hold_formatting_boundaries() {
        assert_eq!(format_hold(None), None);
        assert_eq!(format_hold(Some(0)), None);
        assert_eq!(format_hold(Some(-5)), None);
        assert_eq!(format_hold(Some(59)), Some("59s".to_string()));
        assert_eq!(format_hold(Some(60)), Some("1m".to_string()));
        assert_eq!(format_hold(Some(125)), Some("2m 5s".to_string()));
    }

    #[test]
    fn dates_put_the_day_before_the_month() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        assert_eq!(long_date(date), "3 Feb 2026");
        assert_eq!(short_date(date), "Feb 2026");
    }
}
