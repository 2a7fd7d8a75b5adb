use crate::ports::outbound::BloomIndexBuilder;
use ri_02_event_bloom::EventBloomBuilder;
use shared_types::EventRecord;

impl BloomIndexBuilder for EventBloomBuilder {
    fn build(&self, events: &[EventRecord]) -> Vec<u8> {
        EventBloomBuilder::build(self, events)
    }

    fn validate(&self) -> Result<(), String> {
        self.config().validate().map_err(|e| e.to_string())
    }
}
