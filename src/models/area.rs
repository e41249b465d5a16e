use std::collections::BTreeMap;
use std::fmt;
use serde::Deserialize;

/// A forecast area as offered for selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub code: String,
    pub name: String,
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:<8} {}", self.code, self.name)
    }
}

#[derive(Deserialize)]
pub struct Office {
    pub name: String,
}

/// The JMA `area.json` document, only the offices are of interest
#[derive(Deserialize)]
pub struct JmaAreaList {
    #[serde(default)]
    pub offices: BTreeMap<String, Office>,
}

impl From<JmaAreaList> for Vec<Area> {
    fn from(list: JmaAreaList) -> Self {
        list.offices
            .into_iter()
            .map(|(code, office)| Area { code, name: office.name })
            .collect()
    }
}

/// Area entry as served by the backend at `/areas`
#[derive(Deserialize)]
pub struct BackendArea {
    pub area_code: String,
    pub area_name: String,
}

impl From<BackendArea> for Area {
    fn from(a: BackendArea) -> Self {
        Area { code: a.area_code, name: a.area_name }
    }
}

/// Returns the name of the area with the given code, or the code itself if unknown
///
/// # Arguments
///
/// * 'areas' - areas to search
/// * 'code' - area code to look for
pub fn area_name(areas: &[Area], code: &str) -> String {
    areas.iter()
        .find(|a| a.code == code)
        .map_or_else(|| code.to_string(), |a| a.name.clone())
}
