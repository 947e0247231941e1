// Prompt for gift suggestions. Each input is embedded exactly once, verbatim.

/// Event label used by the on-demand endpoint, which covers both occasions.
pub const UPCOMING_EVENTS_LABEL: &str = "upcoming birthday and anniversary";

pub fn build_suggestion_prompt(name: &str, event_label: &str, interests: &str) -> String {
    format!(
        "Suggest gift ideas for {event_label} of {name} \
         in one sentence but in a detailed and descriptive manner, \
         given they are interested in {interests}."
    )
}
