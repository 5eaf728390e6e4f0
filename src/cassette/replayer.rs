//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Replays interactions from a loaded cassette. Each `port::method` pair is
/// an independent queue served in recording order.
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
    consumed: HashMap<(String, String), u64>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues, consumed: HashMap::new() }
    }

    /// Create a replayer containing only the interactions of one port.
    #[must_use]
    pub fn for_port(cassette: &Cassette, port: &str) -> Self {
        let mut replayer = Self::new(cassette);
        replayer.queues.retain(|(p, _), _| p == port);
        replayer
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the given
    /// port/method pair, naming what was requested and what is available.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let key = (port.to_string(), method.to_string());

        let Some(queue) = self.queues.get_mut(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        };

        let consumed = self.consumed.entry(key).or_default();
        let Some(interaction) = queue.pop_front() else {
            panic!(
                "Cassette exhausted: all {consumed} interactions for port={port:?} \
                 method={method:?} have been consumed."
            );
        };
        *consumed += 1;
        interaction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!({}), output }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { name: "test".into(), recorded_at: Utc::now(), commit: "abc".into(), interactions }
    }

    #[test]
    fn serves_each_pair_in_recording_order() {
        let cassette = make_cassette(vec![
            interaction(0, "fs", "read_to_string", json!({"Ok": "print(1)"})),
            interaction(1, "generator", "generate", json!({"Ok": {"text": "one"}})),
            interaction(2, "fs", "read_to_string", json!({"Ok": "print(2)"})),
            interaction(3, "generator", "generate", json!({"Ok": {"text": "two"}})),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);

        assert_eq!(replayer.next_interaction("generator", "generate").seq, 1);
        assert_eq!(replayer.next_interaction("fs", "read_to_string").seq, 0);
        assert_eq!(replayer.next_interaction("generator", "generate").seq, 3);
        assert_eq!(replayer.next_interaction("fs", "read_to_string").seq, 2);
    }

    #[test]
    fn for_port_keeps_only_that_port() {
        let cassette = make_cassette(vec![
            interaction(0, "fs", "exists", json!(true)),
            interaction(1, "generator", "generate", json!({"Ok": {"text": "t"}})),
        ]);
        let mut replayer = CassetteReplayer::for_port(&cassette, "generator");
        assert_eq!(replayer.next_interaction("generator", "generate").seq, 1);
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted")]
    fn exhausted_queue_panics_with_descriptive_message() {
        let cassette =
            make_cassette(vec![interaction(0, "generator", "generate", json!({"Ok": {"text": ""}}))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("generator", "generate");
        let _ = replayer.next_interaction("generator", "generate");
    }

    #[test]
    #[should_panic(expected = "no interactions recorded")]
    fn unknown_pair_panics() {
        let mut replayer = CassetteReplayer::new(&make_cassette(vec![]));
        let _ = replayer.next_interaction("fs", "write");
    }
}
