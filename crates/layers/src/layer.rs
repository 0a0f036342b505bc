pub trait Layer {
    /// Short machine name, used in logs and API payloads.
    fn name(&self) -> &'static str;
}
