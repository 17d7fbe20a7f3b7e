// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use fnaction_api::schedule::ScheduleData;
use fnaction_core::{DeployError, ScheduleSpec};

const UNNAMED_SCHEDULE: &str = "undefined";

#[derive(Debug, serde::Deserialize)]
struct ScheduleEntry {
    name: Option<String>,
    cron: Option<String>,
    data: Option<serde_json::Value>,
}

/// Load the schedules of `identity` from a YAML list of `{name, cron, data}`.
///
/// Remote schedule names are prefixed with the identity.
pub fn load_schedules(path: &std::path::Path, identity: &str) -> Result<Vec<ScheduleSpec>, DeployError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| DeployError::Validation(format!("Cannot read schedules file {}: {}", path.display(), err)))?;
    parse_schedules(&content, identity)
}

pub fn parse_schedules(content: &str, identity: &str) -> Result<Vec<ScheduleSpec>, DeployError> {
    let entries: Option<Vec<ScheduleEntry>> =
        serde_yaml::from_str(content).map_err(|err| DeployError::Validation(format!("Invalid schedules file: {}", err)))?;

    entries
        .unwrap_or_default()
        .into_iter()
        .map(|entry| {
            let name = format!("{}:{}", identity, entry.name.as_deref().unwrap_or(UNNAMED_SCHEDULE));
            let cron = entry
                .cron
                .ok_or_else(|| DeployError::Validation(format!("Schedule '{}' has no cron expression", name)))?;
            let data = match entry.data {
                None | Some(serde_json::Value::Null) => ScheduleData::new(),
                Some(serde_json::Value::Object(data)) => data,
                Some(other) => {
                    return Err(DeployError::Validation(format!(
                        "Data of schedule '{}' must be a mapping, got: {}",
                        name, other
                    )))
                }
            };
            ScheduleSpec::new(&name, &cron, data)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_schedules() {
        let content = r#"
- name: daily
  cron: " 0 0 * * * "
  data:
    lookback_minutes: 60
    assets: [pump-1, pump-2]
- cron: "*/15 * * * *"
"#;
        let schedules = parse_schedules(content, "proj/fn1").unwrap();
        assert_eq!(schedules.len(), 2);

        assert_eq!(schedules[0].name, "proj/fn1:daily");
        assert_eq!(schedules[0].cron, "0 0 * * *");
        assert_eq!(schedules[0].data["lookback_minutes"], serde_json::json!(60));
        assert_eq!(schedules[0].data["assets"], serde_json::json!(["pump-1", "pump-2"]));

        assert_eq!(schedules[1].name, "proj/fn1:undefined");
        assert!(schedules[1].data.is_empty());
    }

    #[test]
    fn test_empty_file() {
        assert!(parse_schedules("", "proj/fn1").unwrap().is_empty());
        assert!(parse_schedules("[]", "proj/fn1").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_schedules() {
        for content in [
            "- name: nightly\n  cron: \"0 25 * * *\"\n",
            "- name: nightly\n",
            "- name: nightly\n  cron: \"0 0 * * *\"\n  data: [1, 2]\n",
            "name: not-a-list\n",
        ] {
            match parse_schedules(content, "proj/fn1") {
                Err(DeployError::Validation(_)) => {}
                other => panic!("unexpected result for {:?}: {:?}", content, other),
            }
        }
    }

    #[test]
    fn test_load_schedules() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedules.yaml");
        std::fs::write(&path, "- name: s1\n  cron: \"*/5 * * * *\"\n").unwrap();

        let schedules = load_schedules(&path, "proj/fn1").unwrap();
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].name, "proj/fn1:s1");

        assert!(load_schedules(&dir.path().join("missing.yaml"), "proj/fn1").is_err());
    }
}
