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

use std::fmt;
use std::io::Write;
use std::sync::Once;
use std::time::SystemTime;

use fern::FormatCallback;
use log::LevelFilter;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde_json::Map;

use crate::Config;
use crate::loggers::new_file_log_writer;

#[allow(dyn_drop)]
type Guards = Vec<Box<dyn Drop + Send + Sync + 'static>>;

#[allow(dyn_drop)]
static GLOBAL_UT_LOG_GUARD: Lazy<Mutex<Option<Guards>>> = Lazy::new(|| Mutex::new(None));

/// Init logging for unittest.
/// Write logs to file `unittest`, at most once per process.
pub fn init_default_ut_tracing() {
    static START: Once = Once::new();

    START.call_once(|| {
        let mut g = GLOBAL_UT_LOG_GUARD.lock();
        *g = Some(init_logging("unittest", &Config::new_testing()));
    });
}

/// Install the global `log` dispatcher described by `cfg`.
///
/// The returned guards flush the file writers when dropped, keep them
/// alive for the lifetime of the process.
#[allow(dyn_drop)]
pub fn init_logging(name: &str, cfg: &Config) -> Guards {
    let mut guards: Guards = Vec::new();
    let mut normal_logger = fern::Dispatch::new();

    // File logger
    if cfg.file.on {
        let (normal_log_file, flush_guard) = new_file_log_writer(&cfg.file.dir, name);
        guards.push(Box::new(flush_guard));
        let dispatch = fern::Dispatch::new()
            .level(cfg.file.level.parse().unwrap_or(LevelFilter::Info))
            .format(formatter(&cfg.file.format))
            .chain(Box::new(normal_log_file) as Box<dyn Write + Send>);
        normal_logger = normal_logger.chain(dispatch);
    }

    // Console logger
    if cfg.stderr.on {
        let dispatch = fern::Dispatch::new()
            .level(cfg.stderr.level.parse().unwrap_or(LevelFilter::Info))
            .format(formatter(&cfg.stderr.format))
            .chain(std::io::stderr());
        normal_logger = normal_logger.chain(dispatch);
    }

    let logger = fern::Dispatch::new()
        .filter(|meta| {
            if meta.target().starts_with("frjoin_") {
                true
            } else {
                meta.level() <= LevelFilter::Error
            }
        })
        .chain(normal_logger);

    // Set global logger
    if logger.apply().is_err() {
        eprintln!("logger has already been set");
        return Vec::new();
    }

    guards
}

fn formatter(format: &str) -> fn(out: FormatCallback, message: &fmt::Arguments, record: &log::Record) {
    match format {
        "json" => format_json_log,
        _ => format_text_log,
    }
}

fn format_text_log(out: FormatCallback, message: &fmt::Arguments, record: &log::Record) {
    out.finish(format_args!(
        "{} {:>5} {}: {}:{} {}{}",
        humantime::format_rfc3339_micros(SystemTime::now()),
        record.level(),
        record.module_path().unwrap_or(""),
        record.file().unwrap_or(""),
        record.line().unwrap_or(0),
        message,
        KvDisplay {
            kv: record.key_values()
        }
    ));

    struct KvDisplay<'kvs> {
        kv: &'kvs dyn log::kv::Source,
    }

    impl fmt::Display for KvDisplay<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut visitor = KvWriter { writer: f };
            self.kv.visit(&mut visitor).ok();
            Ok(())
        }
    }

    struct KvWriter<'a, 'kvs> {
        writer: &'kvs mut fmt::Formatter<'a>,
    }

    impl<'kvs> log::kv::VisitSource<'kvs> for KvWriter<'_, 'kvs> {
        fn visit_pair(
            &mut self,
            key: log::kv::Key<'kvs>,
            value: log::kv::Value<'kvs>,
        ) -> Result<(), log::kv::Error> {
            write!(self.writer, " {key}={value}")?;
            Ok(())
        }
    }
}

fn format_json_log(out: FormatCallback, message: &fmt::Arguments, record: &log::Record) {
    let mut fields = Map::new();
    fields.insert("message".to_string(), format!("{}", message).into());
    let mut visitor = KvCollector {
        fields: &mut fields,
    };
    record.key_values().visit(&mut visitor).ok();

    out.finish(format_args!(
        r#"{{"timestamp":"{}","level":"{}","fields":{}}}"#,
        humantime::format_rfc3339_micros(SystemTime::now()),
        record.level(),
        serde_json::to_string(&fields).unwrap_or_default(),
    ));

    struct KvCollector<'a> {
        fields: &'a mut Map<String, serde_json::Value>,
    }

    impl<'kvs> log::kv::VisitSource<'kvs> for KvCollector<'_> {
        fn visit_pair(
            &mut self,
            key: log::kv::Key<'kvs>,
            value: log::kv::Value<'kvs>,
        ) -> Result<(), log::kv::Error> {
            self.fields
                .insert(key.as_str().to_string(), value.to_string().into());
            Ok(())
        }
    }
}
