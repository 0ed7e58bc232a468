//! The orchestrator.

use std::cell::{Ref, RefCell};

use crate::{
    backend::{Backend, BackendElement, ShellEvent},
    config::ShellConfig,
    dictionary::{self, Dictionary},
    fetch::Fetch,
    gate::{GateAction, GateInput, TranslationGate},
    i18n::{Translator, LOADING_MARKER},
    loader::ComponentLoader,
    path::{Locale, PagePath},
};

/// The page shell.
///
/// It loads the components and the dictionary of a page concurrently,
/// and runs the translation pass whenever the document changes after the dictionary has settled.
pub struct PageShell<B: Backend, F: Fetch> {
    backend: B,
    fetcher: F,
    config: ShellConfig,
    page: PagePath,
    gate: RefCell<TranslationGate>,
}

impl<B: Backend, F: Fetch> PageShell<B, F> {
    /// Create a shell for the current page of `backend` .
    pub fn new(backend: B, fetcher: F, config: ShellConfig) -> Self {
        let page = PagePath::resolve(&backend.location_path(), &config);
        log::debug!(
            "Page {:?} (depth {}, {:?})",
            page.path(),
            page.depth(),
            page.locale()
        );
        Self {
            backend,
            fetcher,
            config,
            page,
            gate: RefCell::new(TranslationGate::new()),
        }
    }

    /// The backend.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The configuration.
    #[inline]
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// The resolved current page.
    #[inline]
    pub fn page(&self) -> &PagePath {
        &self.page
    }

    /// The translation gate.
    pub fn gate(&self) -> Ref<'_, TranslationGate> {
        self.gate.borrow()
    }

    /// Load everything.
    ///
    /// The returned future resolves when all components and the dictionary have settled.
    pub async fn run(&self) {
        let alternate = self.page.locale() == Locale::Alternate;
        if alternate {
            self.set_loading(true);
        }
        let listener = |event: &ShellEvent| {
            let input = match event {
                ShellEvent::ComponentLoaded { name, .. } => GateInput::ComponentLoaded(name.clone()),
                ShellEvent::AllComponentsLoaded => GateInput::AllComponentsLoaded,
            };
            self.handle(input);
        };
        let loader = ComponentLoader::new(&self.backend, &self.fetcher, &self.config, &self.page)
            .with_listener(&listener);
        let translations = async {
            let dict =
                match dictionary::load(&self.fetcher, &self.config.locale, self.page.locale()).await
                {
                    Ok(x) => x,
                    Err(err) => {
                        log::warn!("Could not load translations: {}", err);
                        None
                    }
                };
            self.handle(GateInput::DictionarySettled(dict));
            if alternate {
                self.set_loading(false);
            }
        };
        futures::join!(loader.load_all(), translations);
    }

    /// Feed an input to the translation gate and run the requested action.
    pub fn handle(&self, input: GateInput) {
        let action = self.gate.borrow_mut().input(input);
        if let GateAction::Refresh(dict) = action {
            self.refresh(dict.as_deref());
        }
    }

    fn refresh(&self, dict: Option<&Dictionary>) {
        let translator = Translator::new(&self.backend, &self.config, &self.page);
        if let Err(err) = translator.refresh(dict) {
            log::error!("Translation pass failed: {}", err);
        }
    }

    fn set_loading(&self, loading: bool) {
        let ret = self.backend.document_element().and_then(|elem| {
            if loading {
                elem.set_attribute(LOADING_MARKER, "")
            } else {
                elem.remove_attribute(LOADING_MARKER)
            }
        });
        if let Err(err) = ret {
            log::error!("Cannot update the loading marker: {}", err);
        }
    }
}
