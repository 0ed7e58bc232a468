//! The site configuration.
//!
//! Values are read from `pageshell.toml` in the site root,
//! then overridden by environment variables, then by command line flags.
//!
//! ```toml
//! [site]
//! exclude = ["node_modules", ".git"]
//!
//! [build]
//! css-input = "styles/main.css"
//! css-output = "styles/main.min.css"
//!
//! [shell.locale]
//! prefix = "fo"
//! ```

use std::{
    env,
    path::{Path, PathBuf},
};

use pageshell::config::ShellConfig;
use serde::Deserialize;

use crate::{fs_fetch::FsFetcher, ToolError};

/// The file name of the configuration.
pub const CONFIG_FILE: &str = "pageshell.toml";

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "kebab-case")]
struct Manifest {
    site: SiteManifest,
    build: BuildManifest,
    shell: ShellConfig,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "kebab-case")]
struct SiteManifest {
    exclude: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "kebab-case")]
struct BuildManifest {
    css_input: Option<String>,
    css_output: Option<String>,
}

/// The resolved site configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// The directory served as `/` .
    pub root: PathBuf,
    /// Directory names skipped when scanning for pages.
    pub exclude: Vec<String>,
    /// The stylesheet to minify.
    pub css_input: PathBuf,
    /// The minified stylesheet.
    pub css_output: PathBuf,
    /// The shell configuration used by the checker and the prerenderer.
    pub shell: ShellConfig,
}

impl SiteConfig {
    /// Load the configuration.
    ///
    /// The site root is `root` if given, or the `PAGESHELL_SITE_ROOT` environment variable,
    /// or the current directory.
    /// A missing configuration file is not an error.
    pub fn load(root: Option<&Path>) -> Result<Self, ToolError> {
        let root = root
            .map(|x| x.to_path_buf())
            .or_else(|| env::var("PAGESHELL_SITE_ROOT").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        // read manifest
        let path = root.join(CONFIG_FILE);
        let manifest = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|err| ToolError::Parse {
                path: path.clone(),
                msg: err.to_string(),
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No {} in {}", CONFIG_FILE, root.display());
                Manifest::default()
            }
            Err(err) => return Err(ToolError::Io { path, err }),
        };
        let Manifest { site, build, shell } = manifest;

        // check env vars
        let css_input = env::var("PAGESHELL_CSS_INPUT")
            .ok()
            .or(build.css_input)
            .unwrap_or_else(|| "styles/main.css".into());
        let css_output = env::var("PAGESHELL_CSS_OUTPUT")
            .ok()
            .or(build.css_output)
            .unwrap_or_else(|| "styles/main.min.css".into());
        let exclude = site
            .exclude
            .unwrap_or_else(|| vec!["node_modules".into(), ".git".into()]);

        Ok(Self {
            css_input: root.join(css_input),
            css_output: root.join(css_output),
            exclude,
            shell,
            root,
        })
    }

    /// A fetcher serving the site root.
    pub fn fetcher(&self) -> FsFetcher {
        FsFetcher::new(&self.root)
    }

    /// The dictionary file of the alternate locale.
    pub fn dictionary_path(&self) -> PathBuf {
        self.fetcher().file_path(&self.shell.locale.dictionary_url)
    }
}
