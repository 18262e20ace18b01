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

/// Map the `idx`-th broadcast source to its logical input slot.
///
/// The fragmented input occupies slot `fragment` among all join inputs but
/// has no broadcast source, so every source at or after that position is
/// shifted up by one.
#[inline]
pub fn adjusted_index(idx: usize, fragment: usize) -> usize {
    if idx < fragment { idx } else { idx + 1 }
}

/// Logical slots of `num_replicated` broadcast sources, in build order.
pub fn replicated_slots(num_replicated: usize, fragment: usize) -> impl Iterator<Item = usize> {
    (0..num_replicated).map(move |idx| adjusted_index(idx, fragment))
}
