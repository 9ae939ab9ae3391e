//! Inline vs. out-of-line storage decision.
//!
//! A message is embedded in its parent unless it is expensive to embed:
//! each field costs 1, a singular message field costs what its type costs
//! as a field, and a real oneof costs as much as its most expensive member.
//! Types whose cost reaches the threshold are stored behind a pointer and
//! then cost 1 as a field themselves.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::config::CompilerConfig;
use crate::descriptor::{DescriptorPool, FieldDescriptor, FileId, MessageId};

const ANY_TYPE_NAME: &str = "google.protobuf.Any";

/// Outcome for one message type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageDecision {
    pub uses_storage: bool,
    /// What a singular field of this type adds to its parent's cost.
    pub cost_as_field: u32,
}

impl StorageDecision {
    const OUT_OF_LINE: Self = Self {
        uses_storage: true,
        cost_as_field: 1,
    };

    fn from_cost(cost: u32, threshold: u32) -> Self {
        if cost >= threshold {
            Self::OUT_OF_LINE
        } else {
            Self {
                uses_storage: false,
                cost_as_field: cost,
            }
        }
    }
}

/// Memoized storage decisions for the messages of one pool.
#[derive(Debug)]
pub struct StorageAnalysis<'p> {
    pool: &'p DescriptorPool,
    threshold: u32,
    cache: HashMap<String, StorageDecision>,
}

impl<'p> StorageAnalysis<'p> {
    pub fn new(pool: &'p DescriptorPool, config: &CompilerConfig) -> Self {
        Self {
            pool,
            threshold: config.cost_threshold(),
            cache: HashMap::new(),
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    #[tracing::instrument(skip_all, fields(message = %self.pool.message(message).full_name))]
    pub fn decide(&mut self, message: MessageId) -> StorageDecision {
        let pool = self.pool;
        let full_name = pool.message(message).full_name.as_str();
        if let Some(&decision) = self.cache.get(full_name) {
            return decision;
        }
        if full_name == ANY_TYPE_NAME {
            return self.record(message, StorageDecision::OUT_OF_LINE);
        }
        if self.mark_cycles(message) {
            debug!("on a singular field cycle");
            return StorageDecision::OUT_OF_LINE;
        }

        let cost = self.message_cost(message);
        let decision = StorageDecision::from_cost(cost, self.threshold);
        debug!(cost, uses_storage = decision.uses_storage, "storage decided");
        self.record(message, decision)
    }

    fn record(&mut self, message: MessageId, decision: StorageDecision) -> StorageDecision {
        let full_name = self.pool.message(message).full_name.clone();
        self.cache.insert(full_name, decision);
        decision
    }

    /// Sum of field costs, stopping once the threshold is reached.
    fn message_cost(&mut self, message: MessageId) -> u32 {
        let pool = self.pool;
        let descriptor = pool.message(message);
        let mut cost = 0u32;

        for &id in descriptor.fields_by_number() {
            let field = pool.field(id);
            if field.real_oneof().is_some() {
                continue;
            }
            cost = cost.saturating_add(self.field_cost(field));
            if cost >= self.threshold {
                return cost;
            }
        }

        for &oneof in descriptor.real_oneofs() {
            let widest = pool
                .oneof(oneof)
                .fields
                .iter()
                .map(|&id| self.field_cost(pool.field(id)))
                .max()
                .unwrap_or(0);
            cost = cost.saturating_add(widest);
            if cost >= self.threshold {
                return cost;
            }
        }
        cost
    }

    fn field_cost(&mut self, field: &FieldDescriptor) -> u32 {
        if field.is_repeated() {
            return 1;
        }
        match field.message_type() {
            Some(target) => self.decide(target).cost_as_field,
            None => 1,
        }
    }

    /// Mark every message on a cycle of singular message fields reachable
    /// from `start` within its file. Returns whether `start` is on one.
    fn mark_cycles(&mut self, start: MessageId) -> bool {
        let pool = self.pool;
        let file = pool.message(start).file;
        let mut stack: Vec<MessageId> = Vec::new();
        let mut done: HashSet<MessageId> = HashSet::new();
        let mut members: HashSet<MessageId> = HashSet::new();

        Self::find_cycles(pool, file, start, &mut stack, &mut done, &mut members);

        for &member in &members {
            trace!(member = %pool.message(member).full_name, "cycle member");
            self.record(member, StorageDecision::OUT_OF_LINE);
        }
        members.contains(&start)
    }

    fn find_cycles(
        pool: &DescriptorPool,
        file: FileId,
        message: MessageId,
        stack: &mut Vec<MessageId>,
        done: &mut HashSet<MessageId>,
        members: &mut HashSet<MessageId>,
    ) {
        if let Some(position) = stack.iter().position(|&m| m == message) {
            members.extend(stack[position..].iter().copied());
            return;
        }
        if !done.insert(message) {
            return;
        }

        stack.push(message);
        for field in pool.fields_of(message) {
            if field.is_repeated() {
                continue;
            }
            if let Some(target) = field.message_type()
                && pool.message(target).file == file
            {
                Self::find_cycles(pool, file, target, stack, done, members);
            }
        }
        stack.pop();
    }
}
