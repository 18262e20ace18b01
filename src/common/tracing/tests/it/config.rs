// Copyright 2021 Datafuse Labs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use frjoin_common_tracing::Config;
use frjoin_common_tracing::FileConfig;
use pretty_assertions::assert_eq;

#[test]
fn test_config_default() {
    let cfg = Config::default();
    assert!(cfg.file.on);
    assert!(!cfg.stderr.on);
    assert_eq!(cfg.file.level, "INFO");
    assert_eq!(cfg.file.format, "json");
    assert_eq!(
        cfg.file.to_string(),
        "enabled=true, level=INFO, dir=./.frjoin/logs, format=json"
    );
}

#[test]
fn test_config_from_toml() {
    let cfg: Config = toml::from_str(
        r#"
[file]
level = "DEBUG"
dir = "/tmp/frjoin"

[stderr]
on = true
"#,
    )
    .unwrap();

    assert_eq!(cfg.file, FileConfig {
        on: true,
        level: "DEBUG".to_string(),
        dir: "/tmp/frjoin".to_string(),
        format: "json".to_string(),
    });
    assert!(cfg.stderr.on);
    assert_eq!(cfg.stderr.level, "INFO");
}

#[test]
fn test_config_testing() {
    let cfg = Config::new_testing();
    assert_eq!(cfg.file.level, "DEBUG");
    assert_eq!(cfg.file.format, "text");
    assert!(!cfg.stderr.on);
}
