//! Accessors shared by the synchronous and asynchronous pipelines.

/// Implement the read and configuration accessors for a pipeline type.
///
/// The pipeline must have a `context: ContextSlot<'p>` field and a
/// `lifecycle: Lifecycle` field.
macro_rules! impl_pipeline_accessors {
    ($pipeline:ident) => {
        impl<'p> $pipeline<'p> {
            /// Identifier of this pipeline run.
            pub fn id(&self) -> ::uuid::Uuid {
                self.lifecycle.id()
            }

            /// Name of the action this pipeline executed, empty before `execute`.
            pub fn action_name(&self) -> &str {
                self.lifecycle.action()
            }

            pub fn result(&self) -> $crate::core::ActionResult {
                self.lifecycle.result()
            }

            /// Current or last stage.
            pub fn stage(&self) -> $crate::core::ProcessingStage {
                self.lifecycle.stage()
            }

            pub fn history(&self) -> &$crate::core::StageHistory {
                self.lifecycle.history()
            }

            pub fn is_child_action(&self) -> bool {
                self.lifecycle.is_child()
            }

            pub fn context(&self) -> &$crate::validation::ValidationContext {
                self.context.get()
            }

            pub fn context_mut(&mut self) -> &mut $crate::validation::ValidationContext {
                self.context.get_mut()
            }

            /// Configuration of the context this pipeline validates into.
            pub fn config(&self) -> &$crate::config::ActionConfig {
                self.context.get().config()
            }

            /// Replace the configuration of the context.
            ///
            /// A child pipeline shares its parent's context, so this also
            /// changes the parent's configuration.
            pub fn set_config(&mut self, config: $crate::config::ActionConfig) {
                self.context.get_mut().set_config(config);
            }

            pub fn report(&self) -> $crate::report::ActionReport {
                self.lifecycle.report(self.context.get())
            }

            /// Give back an owned context; `None` for a child pipeline.
            pub fn into_context(self) -> Option<$crate::validation::ValidationContext> {
                self.context.into_owned()
            }
        }
    };
}

pub(crate) use impl_pipeline_accessors;
