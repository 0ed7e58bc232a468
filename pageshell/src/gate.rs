//! The translation gate.
//!
//! Component injection and dictionary loading settle in any order.
//! The gate collects both kinds of inputs and tells the orchestrator when the translation pass should run.

use std::rc::Rc;

use crate::dictionary::Dictionary;

/// An input of the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum GateInput {
    /// Dictionary loading has finished; `None` if there is no dictionary for this page or it failed to load.
    DictionarySettled(Option<Dictionary>),
    /// A component has been injected.
    ComponentLoaded(String),
    /// All component injections have settled.
    AllComponentsLoaded,
}

/// The action requested by the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum GateAction {
    /// Nothing to do yet.
    Idle,
    /// Run the translation pass over the current document.
    Refresh(Option<Rc<Dictionary>>),
}

#[derive(Debug, Clone, PartialEq)]
enum GateState {
    Pending,
    Settled(Option<Rc<Dictionary>>),
}

/// The state machine between component injection and translation.
#[derive(Debug, Clone)]
pub struct TranslationGate {
    state: GateState,
    components: Vec<String>,
    all_components_loaded: bool,
}

impl Default for TranslationGate {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationGate {
    /// Create a gate waiting for the dictionary.
    pub fn new() -> Self {
        Self {
            state: GateState::Pending,
            components: Vec::new(),
            all_components_loaded: false,
        }
    }

    /// Whether dictionary loading has settled.
    pub fn is_settled(&self) -> bool {
        self.state != GateState::Pending
    }

    /// The dictionary, if it has been loaded.
    pub fn dictionary(&self) -> Option<&Dictionary> {
        match &self.state {
            GateState::Settled(x) => x.as_deref(),
            GateState::Pending => None,
        }
    }

    /// The components injected so far, in injection order.
    pub fn loaded_components(&self) -> &[String] {
        &self.components
    }

    /// Whether all component injections have settled.
    pub fn all_components_loaded(&self) -> bool {
        self.all_components_loaded
    }

    /// Feed an input.
    ///
    /// Every input after the dictionary has settled requests a refresh,
    /// since the document may contain new marked elements.
    pub fn input(&mut self, input: GateInput) -> GateAction {
        match input {
            GateInput::DictionarySettled(dict) => {
                if self.is_settled() {
                    log::warn!("The dictionary has already settled");
                } else {
                    self.state = GateState::Settled(dict.map(Rc::new));
                }
            }
            GateInput::ComponentLoaded(name) => {
                self.components.push(name);
            }
            GateInput::AllComponentsLoaded => {
                self.all_components_loaded = true;
            }
        }
        match &self.state {
            GateState::Pending => GateAction::Idle,
            GateState::Settled(x) => GateAction::Refresh(x.clone()),
        }
    }
}
