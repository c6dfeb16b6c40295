//! WeatherAPI condition text in Vietnamese.

/// Translate a WeatherAPI condition description to Vietnamese.
///
/// Matching ignores case and surrounding whitespace. Unknown descriptions are
/// returned unchanged so nothing is silently dropped from the dashboard.
pub fn translate_condition(text: &str) -> String {
    let key = text.trim().to_lowercase();
    let translated = match key.as_str() {
        "" => return String::new(),
        "sunny" => "Nắng",
        "clear" => "Trời quang",
        "partly cloudy" => "Có mây rải rác",
        "cloudy" => "Nhiều mây",
        "overcast" => "U ám",
        "mist" => "Sương mù nhẹ",
        "fog" => "Sương mù",
        "freezing fog" => "Sương mù giá",
        "patchy rain possible" | "patchy rain nearby" => "Có thể có mưa rải rác",
        "patchy light drizzle" => "Mưa phùn nhẹ rải rác",
        "light drizzle" => "Mưa phùn nhẹ",
        "patchy light rain" => "Mưa nhỏ rải rác",
        "light rain" => "Mưa nhỏ",
        "moderate rain at times" => "Lúc có mưa vừa",
        "moderate rain" => "Mưa vừa",
        "heavy rain at times" => "Lúc có mưa to",
        "heavy rain" => "Mưa to",
        "light rain shower" => "Mưa rào nhẹ",
        "moderate or heavy rain shower" => "Mưa rào vừa đến to",
        "torrential rain shower" => "Mưa rào rất to",
        "thundery outbreaks possible" | "thundery outbreaks in nearby" => "Có thể có dông",
        "patchy light rain with thunder" | "patchy light rain in area with thunder" => {
            "Mưa nhỏ kèm sấm sét"
        }
        "moderate or heavy rain with thunder" | "moderate or heavy rain in area with thunder" => {
            "Mưa vừa đến to kèm sấm sét"
        }
        _ => return text.trim().to_string(),
    };
    translated.to_string()
}
