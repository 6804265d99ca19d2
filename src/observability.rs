use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("delulu.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("delulu.client.request_errors");
pub(crate) static CLIENT_EMPTY_RESPONSES: Counter =
    Counter::new("delulu.client.empty_responses");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("delulu.client.request_duration_seconds");

pub(crate) static CHAT_TURNS: Counter = Counter::new("delulu.chat.turns");
pub(crate) static CHAT_TURN_FAILURES: Counter = Counter::new("delulu.chat.turn_failures");
pub(crate) static CHAT_COMMANDS: Counter = Counter::new("delulu.chat.commands");
pub(crate) static TRANSCRIPT_SAVES: Counter = Counter::new("delulu.chat.transcript_saves");

pub(crate) static CREDENTIAL_SAVES: Counter = Counter::new("delulu.credentials.saves");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: &Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_counter(&CLIENT_EMPTY_RESPONSES);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&CHAT_TURNS);
    collector.register_counter(&CHAT_TURN_FAILURES);
    collector.register_counter(&CHAT_COMMANDS);
    collector.register_counter(&TRANSCRIPT_SAVES);

    collector.register_counter(&CREDENTIAL_SAVES);
}
