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

use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;
use std::time::Instant;

use frjoin_common_exception::ErrorCode;
use frjoin_common_exception::Result;
use frjoin_query_config::BuildMode;
use frjoin_query_config::FrJoinConfig;
use frjoin_query_expression::IndexedTuple;
use frjoin_query_expression::Scalar;
use log::debug;
use log::info;

use crate::BuildStatistics;
use crate::JoinHashTable;
use crate::JoinKey;
use crate::KeyCodec;
use crate::ValueExtractor;
use crate::ValueGroup;
use crate::adjusted_index;
use crate::broadcast::BroadcastRecord;
use crate::broadcast::BroadcastSource;
use crate::broadcast::InputRegistry;

/// Progress signal, invoked once per record consumed by the build.
pub type Heartbeat = Arc<dyn Fn() + Send + Sync>;

/// Plan-time description of one fragment-replicate join.
#[derive(Clone)]
pub struct FrJoinDesc {
    /// Names of the broadcast inputs, in build order.
    pub input_keys: Vec<String>,
    /// Logical slot of the fragmented input.
    pub fragment: usize,
    /// One value extractor per logical slot, the fragmented one included.
    pub local_rearranges: Vec<Arc<dyn ValueExtractor>>,
}

impl FrJoinDesc {
    pub fn num_inputs(&self) -> usize {
        self.input_keys.len() + 1
    }
}

impl Debug for FrJoinDesc {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrJoinDesc")
            .field("input_keys", &self.input_keys)
            .field("fragment", &self.fragment)
            .field("local_rearranges", &self.local_rearranges.len())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Unbuilt,
    Building { slot: usize },
    Ready,
    Failed,
}

/// Builds one hash table per replicated input and serves the probes of the
/// fragmented input.
///
/// ```text
/// Unbuilt -> Building(slot a) -> ... -> Building(slot z) -> Ready
///                 |                          |
///                 +--------> Failed <--------+
/// ```
///
/// `Ready` and `Failed` are final. Tables are never rebuilt, and tables of
/// a failed build are dropped before anything could probe them.
pub struct FrJoinEngine {
    desc: FrJoinDesc,
    config: FrJoinConfig,
    codec: KeyCodec,
    heartbeat: Option<Heartbeat>,

    attached: bool,
    sources: Vec<Box<dyn BroadcastSource>>,

    state: EngineState,
    failure: Option<ErrorCode>,
    replicates: Vec<Option<Arc<JoinHashTable>>>,
    statistics: Vec<BuildStatistics>,
}

impl Debug for FrJoinEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrJoinEngine")
            .field("name", &self.name())
            .field("desc", &self.desc)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("attached", &self.attached)
            .field("heartbeat", &self.heartbeat.is_some())
            .finish()
    }
}

impl FrJoinEngine {
    pub fn try_create(desc: FrJoinDesc, config: FrJoinConfig) -> Result<FrJoinEngine> {
        config.check()?;

        let num_inputs = desc.num_inputs();
        if desc.fragment >= num_inputs {
            return Err(ErrorCode::BadArguments(format!(
                "fragment slot {} is out of range, the join has {} inputs",
                desc.fragment, num_inputs
            )));
        }

        if desc.local_rearranges.len() != num_inputs {
            return Err(ErrorCode::BadArguments(format!(
                "expect {} local rearranges, one per join input, got {}",
                num_inputs,
                desc.local_rearranges.len()
            )));
        }

        let codec = KeyCodec::new(config.null_key_policy);
        Ok(FrJoinEngine {
            desc,
            config,
            codec,
            heartbeat: None,
            attached: false,
            sources: vec![],
            state: EngineState::Unbuilt,
            failure: None,
            replicates: vec![None; num_inputs],
            statistics: vec![],
        })
    }

    pub fn set_heartbeat(&mut self, heartbeat: Heartbeat) {
        self.heartbeat = Some(heartbeat);
    }

    /// Bind every broadcast input named by the plan.
    ///
    /// In eager mode the hash tables are built right away.
    pub fn attach_inputs(&mut self, registry: &mut InputRegistry) -> Result<()> {
        if self.attached {
            return Err(ErrorCode::Internal(format!(
                "inputs of {} are already attached",
                self.name()
            )));
        }

        let mut sources = Vec::with_capacity(self.desc.input_keys.len());
        for key in &self.desc.input_keys {
            let source = registry
                .take_broadcast(key)
                .map_err(|e| e.add_message(format!("failed to attach inputs of {}", self.name())))?;
            sources.push(source);
        }

        self.sources = sources;
        self.attached = true;

        match self.config.build_mode {
            BuildMode::Eager => self.prepare(),
            BuildMode::Lazy => Ok(()),
        }
    }

    /// Build every replicated hash table unless it is already done.
    ///
    /// Once a build failed, every later call fails as well.
    pub fn prepare(&mut self) -> Result<()> {
        match self.state {
            EngineState::Ready => Ok(()),
            EngineState::Failed => Err(self.failed_error()),
            EngineState::Building { slot } => Err(ErrorCode::Internal(format!(
                "hash table of slot {} is still being built",
                slot
            ))),
            EngineState::Unbuilt => {
                if !self.attached {
                    return Err(ErrorCode::InputsNotAttached(format!(
                        "inputs of {} must be attached before building hash tables",
                        self.name()
                    )));
                }

                match self.build_hash_tables() {
                    Ok((replicates, statistics)) => {
                        self.replicates = replicates;
                        self.statistics = statistics;
                        self.state = EngineState::Ready;
                        Ok(())
                    }
                    Err(cause) => {
                        self.state = EngineState::Failed;
                        self.failure = Some(cause.clone());
                        Err(cause)
                    }
                }
            }
        }
    }

    #[allow(clippy::type_complexity)]
    fn build_hash_tables(
        &mut self,
    ) -> Result<(Vec<Option<Arc<JoinHashTable>>>, Vec<BuildStatistics>)> {
        let start = Instant::now();
        debug!("Completed setup. Trying to build replication hash table");

        let mut replicates = vec![None; self.desc.num_inputs()];
        let mut all_statistics = Vec::with_capacity(self.sources.len());
        let sources = std::mem::take(&mut self.sources);
        for (idx, mut source) in sources.into_iter().enumerate() {
            let slot = adjusted_index(idx, self.desc.fragment);
            self.state = EngineState::Building { slot };

            let (table, statistics) = self.build_hash_table(idx, slot, source.as_mut())?;
            info!("Built replicated hash table of {}: {}", self.name(), statistics);

            replicates[slot] = Some(Arc::new(table));
            all_statistics.push(statistics);
        }

        info!(
            "Hash Table built for {}. Time taken: {:?}",
            self.name(),
            start.elapsed()
        );
        Ok((replicates, all_statistics))
    }

    fn build_hash_table(
        &self,
        idx: usize,
        slot: usize,
        source: &mut dyn BroadcastSource,
    ) -> Result<(JoinHashTable, BuildStatistics)> {
        let start = Instant::now();
        let input = &self.desc.input_keys[idx];
        let local_rearrange = &self.desc.local_rearranges[slot];
        let mut statistics = BuildStatistics::new(input, slot);
        let mut table = JoinHashTable::with_capacity(
            self.config.hash_table_capacity,
            self.config.value_group_capacity,
        );

        loop {
            let record = source.next_record().map_err(|cause| {
                ErrorCode::BroadcastSourceError(format!(
                    "failed to read broadcast input '{}' of slot {} after {} records",
                    input, slot, statistics.rows_read
                ))
                .set_cause(cause)
            })?;

            let Some(BroadcastRecord { key, value }) = record else {
                break;
            };

            if let Some(heartbeat) = &self.heartbeat {
                heartbeat();
            }
            statistics.rows_read += 1;

            let Some(join_key) = self.codec.decode(&key) else {
                statistics.null_keys += 1;
                continue;
            };

            let value = local_rearrange
                .extract(IndexedTuple::new(key.index, key.key, value))
                .map_err(|e| {
                    e.add_message(format!(
                        "failed to extract value of broadcast input '{}' of slot {}",
                        input, slot
                    ))
                })?;
            table.put(join_key, value);
        }

        statistics.distinct_keys = table.len();
        statistics.num_values = table.num_values();
        statistics.elapsed = start.elapsed();
        Ok((table, statistics))
    }

    fn failed_error(&self) -> ErrorCode {
        let error = ErrorCode::HashTableBuildFailed(format!(
            "hash tables of {} failed to build",
            self.name()
        ));
        match &self.failure {
            Some(cause) => error.set_cause(cause.clone()),
            None => error,
        }
    }

    fn replicate(&self, slot: usize) -> Result<&Arc<JoinHashTable>> {
        match self.state {
            EngineState::Ready => {}
            EngineState::Failed => return Err(self.failed_error()),
            EngineState::Unbuilt | EngineState::Building { .. } => {
                return Err(ErrorCode::HashTableNotReady(format!(
                    "hash tables of {} are probed before they are built",
                    self.name()
                )));
            }
        }

        if slot >= self.desc.num_inputs() {
            return Err(ErrorCode::BadArguments(format!(
                "slot {} is out of range, the join has {} inputs",
                slot,
                self.desc.num_inputs()
            )));
        }

        if slot == self.desc.fragment {
            return Err(ErrorCode::BadArguments(format!(
                "slot {} is the fragmented input, it has no hash table",
                slot
            )));
        }

        self.replicates[slot].as_ref().ok_or_else(|| {
            ErrorCode::Internal(format!("hash table of replicated slot {} is missing", slot))
        })
    }

    /// Values of `slot` stored under `key`, `None` if the key is absent.
    pub fn lookup(&self, slot: usize, key: &JoinKey) -> Result<Option<&ValueGroup>> {
        Ok(self.replicate(slot)?.get(key))
    }

    /// Like [`FrJoinEngine::lookup`] for a raw probe key; null keys match nothing.
    pub fn lookup_scalar(&self, slot: usize, key: &Scalar) -> Result<Option<&ValueGroup>> {
        let table = self.replicate(slot)?;
        Ok(self
            .codec
            .encode_non_null(key)
            .and_then(|key| table.get(&key)))
    }

    /// Shared handle on the built table of `slot`, for concurrent probing.
    pub fn hash_table(&self, slot: usize) -> Result<Arc<JoinHashTable>> {
        self.replicate(slot).cloned()
    }

    /// `<operator>\t<-\t<input,input,...>`, the broadcast inputs in build order.
    pub fn name(&self) -> String {
        format!(
            "{}\t<-\t{}",
            self.config.operator_name,
            self.desc.input_keys.join(",")
        )
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn key_codec(&self) -> &KeyCodec {
        &self.codec
    }

    pub fn fragment(&self) -> usize {
        self.desc.fragment
    }

    pub fn num_inputs(&self) -> usize {
        self.desc.num_inputs()
    }

    /// Statistics of every built table, in build order. Empty unless `Ready`.
    pub fn build_statistics(&self) -> &[BuildStatistics] {
        &self.statistics
    }
}
