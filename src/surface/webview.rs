//! WebView-backed surfaces using `wry` + `tao`.
//!
//! Surfaces live on the UI thread (tao event loop); the orchestrator runs
//! on the tokio runtime. The factory therefore returns remote handles that
//! forward commands to the UI thread over the event-loop proxy, and the UI
//! thread pushes page-load events back through the surface signal channel.
//! Each session gets its own window whose webview uses a dedicated
//! `WebContext` data directory, which is what isolates the storage
//! partitions.

use std::path::PathBuf;

use tao::event_loop::EventLoopProxy;

use crate::surface::{SessionContainer, Surface, SurfaceBinding, SurfaceFactory};
use crate::types::errors::SurfaceError;
use crate::types::profile::Profile;

/// Commands executed on the UI thread against live webviews. The panel's
/// user-event type wraps these via `From`.
#[derive(Debug, Clone)]
pub enum SurfaceHostCommand {
    Create {
        name: String,
        title: String,
        partition_dir: PathBuf,
        url: String,
    },
    Navigate { name: String, url: String },
    Reload { name: String },
    Remove { name: String },
}

fn send<T>(proxy: &EventLoopProxy<T>, command: SurfaceHostCommand) -> Result<(), SurfaceError>
where
    T: From<SurfaceHostCommand> + 'static,
{
    proxy
        .send_event(command.into())
        .map_err(|_| SurfaceError::NavigationFailed("UI event loop closed".to_string()))
}

struct RemoteSurface<T: From<SurfaceHostCommand> + Send + 'static> {
    name: String,
    proxy: EventLoopProxy<T>,
}

impl<T: From<SurfaceHostCommand> + Send + 'static> Surface for RemoteSurface<T> {
    fn navigate(&mut self, url: &str) -> Result<(), SurfaceError> {
        send(
            &self.proxy,
            SurfaceHostCommand::Navigate {
                name: self.name.clone(),
                url: url.to_string(),
            },
        )
    }

    fn reload(&mut self) -> Result<(), SurfaceError> {
        send(
            &self.proxy,
            SurfaceHostCommand::Reload {
                name: self.name.clone(),
            },
        )
    }
}

struct RemoteContainer<T: From<SurfaceHostCommand> + Send + 'static> {
    name: String,
    proxy: EventLoopProxy<T>,
}

impl<T: From<SurfaceHostCommand> + Send + 'static> SessionContainer for RemoteContainer<T> {
    fn remove(&mut self) -> Result<(), SurfaceError> {
        send(
            &self.proxy,
            SurfaceHostCommand::Remove {
                name: self.name.clone(),
            },
        )
        .map_err(|_| SurfaceError::TeardownFailed("UI event loop closed".to_string()))
    }
}

/// `SurfaceFactory` that materializes one window + webview per session on
/// the UI thread.
pub struct WebviewSurfaceFactory<T: From<SurfaceHostCommand> + Send + 'static> {
    proxy: EventLoopProxy<T>,
    partition_root: PathBuf,
}

impl<T: From<SurfaceHostCommand> + Send + 'static> WebviewSurfaceFactory<T> {
    /// `partition_root` is the directory under which each profile gets its
    /// own `WebContext` data directory.
    pub fn new(proxy: EventLoopProxy<T>, partition_root: PathBuf) -> Self {
        Self {
            proxy,
            partition_root,
        }
    }
}

impl<T: From<SurfaceHostCommand> + Send + 'static> SurfaceFactory for WebviewSurfaceFactory<T> {
    fn create(
        &mut self,
        profile: &Profile,
        initial_url: &str,
    ) -> Result<SurfaceBinding, SurfaceError> {
        send(
            &self.proxy,
            SurfaceHostCommand::Create {
                name: profile.name.clone(),
                title: profile.title(),
                partition_dir: self.partition_root.join(profile.partition()),
                url: initial_url.to_string(),
            },
        )
        .map_err(|_| SurfaceError::CreateFailed("UI event loop closed".to_string()))?;

        Ok(SurfaceBinding {
            surface: Box::new(RemoteSurface {
                name: profile.name.clone(),
                proxy: self.proxy.clone(),
            }),
            container: Box::new(RemoteContainer {
                name: profile.name.clone(),
                proxy: self.proxy.clone(),
            }),
        })
    }
}
