//! Component fetching and injection.

use futures::future::join_all;

use crate::{
    backend::{Backend, BackendElement, ShellEvent},
    config::ShellConfig,
    error::Error,
    fetch::{Fetch, FetchRequest},
    path::PagePath,
    rewrite::rewrite_asset_paths,
};

/// Loads the components of a page into their placeholders.
pub struct ComponentLoader<'a, B: Backend, F: Fetch> {
    backend: &'a B,
    fetcher: &'a F,
    config: &'a ShellConfig,
    page: &'a PagePath,
    listener: Option<&'a dyn Fn(&ShellEvent)>,
}

impl<'a, B: Backend, F: Fetch> ComponentLoader<'a, B, F> {
    /// Create a loader for the page `page` .
    pub fn new(backend: &'a B, fetcher: &'a F, config: &'a ShellConfig, page: &'a PagePath) -> Self {
        Self {
            backend,
            fetcher,
            config,
            page,
            listener: None,
        }
    }

    /// Call `listener` after every event is dispatched to the backend.
    pub fn with_listener(mut self, listener: &'a dyn Fn(&ShellEvent)) -> Self {
        self.listener = Some(listener);
        self
    }

    fn emit(&self, event: ShellEvent) {
        if let Err(err) = self.backend.dispatch_event(&event) {
            log::error!("Cannot dispatch {:?}: {}", event.event_type(), err);
        }
        if let Some(f) = self.listener {
            f(&event);
        }
    }

    /// Fetch the fragment of a component, bypassing caches.
    ///
    /// Returns `None` if there is no component named `name` .
    pub async fn fetch(&self, name: &str) -> Result<Option<String>, Error> {
        let Some(component) = self.config.component(name) else {
            return Ok(None);
        };
        let req = FetchRequest::no_store(&component.url, self.backend.timestamp());
        let html = self.fetcher.fetch_text(req).await?;
        Ok(Some(html))
    }

    async fn try_inject(&self, name: &str, target_selector: &str) -> Result<bool, Error> {
        let Some(html) = self.fetch(name).await? else {
            return Err(Error::UnknownComponent {
                name: name.to_string(),
            });
        };
        let html = rewrite_asset_paths(&html, self.page.depth());
        let Some(target) = self.backend.query_selector(target_selector)? else {
            return Ok(false);
        };
        target.replace_children_with_html(&html)?;
        if name == self.config.nav.component {
            self.mark_active_links(&target)?;
        }
        Ok(true)
    }

    /// Inject a component into the element matching `target_selector` .
    ///
    /// Failures are not reported:
    /// the target is left unchanged and no `ComponentLoaded` event is emitted.
    pub async fn inject(&self, name: &str, target_selector: &str) {
        match self.try_inject(name, target_selector).await {
            Ok(true) => {
                self.emit(ShellEvent::ComponentLoaded {
                    name: name.to_string(),
                    target_selector: target_selector.to_string(),
                });
            }
            Ok(false) => {
                log::debug!("Component {:?} skipped", name);
            }
            Err(err) => {
                log::debug!("Component {:?} not loaded: {}", name, err);
            }
        }
    }

    /// Inject all components in parallel.
    ///
    /// `AllComponentsLoaded` is emitted once after every injection has settled.
    pub async fn load_all(&self) {
        join_all(
            self.config
                .components
                .iter()
                .map(|x| self.inject(&x.name, &x.target)),
        )
        .await;
        self.emit(ShellEvent::AllComponentsLoaded);
    }

    /// Add the active class to the navigation links in `container` which point to the current page.
    pub fn mark_active_links(&self, container: &B::Element) -> Result<(), Error> {
        let nav = &self.config.nav;
        for link in container.query_selector_all(&nav.link_selector)? {
            let Some(href) = link.attribute("href") else {
                continue;
            };
            if self.page.is_link_active(&href) {
                link.add_class(&nav.active_class)?;
            }
        }
        Ok(())
    }
}
