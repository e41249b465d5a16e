use std::fmt;

/// Pictogram buckets for JMA weather codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Snow,
    Unknown,
}

impl WeatherIcon {
    /// Returns the bucket for a three-digit JMA weather code
    ///
    /// # Arguments
    ///
    /// * 'code' - weather code, e.g. "101"
    pub fn from_code(code: &str) -> WeatherIcon {
        match code {
            "100" => WeatherIcon::Clear,

            "101" | "102" | "103" | "104" |
            "110" | "111" | "112" | "113" | "114" |
            "115" | "116" | "117" | "118" |
            "119" | "120" | "121" | "122" | "123" |
            "124" | "125" | "126" | "127" | "128" |
            "130" | "131" | "132" | "140" | "160" |
            "170" => WeatherIcon::PartlyCloudy,

            "200" | "201" | "202" | "203" | "204" |
            "205" | "206" | "207" | "208" | "209" |
            "210" | "211" | "212" | "213" | "214" |
            "215" | "216" | "217" | "218" | "219" |
            "220" | "221" | "222" | "223" | "224" |
            "225" | "226" | "228" | "229" | "230" |
            "231" | "240" | "250" | "260" | "270" |
            "281" => WeatherIcon::Cloudy,

            "300" | "301" | "302" | "303" | "304" |
            "306" | "308" | "309" | "311" | "313" |
            "314" | "315" | "316" | "317" | "320" |
            "321" | "322" | "323" | "324" | "325" |
            "326" | "327" | "328" | "329" | "340" |
            "350" => WeatherIcon::Rain,

            "400" | "401" | "402" | "403" | "405" |
            "406" | "407" | "409" | "411" | "413" |
            "414" | "420" | "421" | "422" | "423" |
            "425" | "426" | "427" | "430" | "450" => WeatherIcon::Snow,

            _ => WeatherIcon::Unknown,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::Clear => "☀️",
            WeatherIcon::PartlyCloudy => "🌤️",
            WeatherIcon::Cloudy => "☁️",
            WeatherIcon::Rain => "🌧️",
            WeatherIcon::Snow => "❄️",
            WeatherIcon::Unknown => "🌈",
        }
    }
}

impl fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Returns the pictogram for a weather code, unknown or empty codes give the fallback glyph
///
/// # Arguments
///
/// * 'code' - weather code, e.g. "101"
pub fn get_weather_icon(code: &str) -> &'static str {
    WeatherIcon::from_code(code).glyph()
}
