//! WebView-based control panel using `wry` + `tao`.
//!
//! Architecture:
//! - The panel page is served over the `ld://` custom protocol; its
//!   controls talk to Rust via `window.ipc.postMessage()`.
//! - The orchestrator and backend client run on a dedicated tokio runtime
//!   thread; the UI thread forwards panel commands to it over a channel
//!   and receives rendered state back as user events.
//! - Each session gets its own `tao` window with a `wry` webview whose
//!   `WebContext` points at a per-profile data directory, which is what
//!   keeps the storage partitions isolated.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;

use tao::event::{Event, WindowEvent};
use tao::event_loop::{
    ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy, EventLoopWindowTarget,
};
use tao::window::{Window, WindowBuilder, WindowId};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use wry::{PageLoadEvent, WebContext, WebView, WebViewBuilder};

use crate::app::App;
use crate::backend::client::HttpBackendClient;
use crate::backend::supervisor::BackendSupervisor;
use crate::lobby::pacing::FixedIntervalPacer;
use crate::services::activity_log::SharedLog;
use crate::surface::webview::{SurfaceHostCommand, WebviewSurfaceFactory};
use crate::surface::{SignalSender, SurfaceEvent, SurfaceSignal};

#[derive(Debug)]
enum UserEvent {
    /// Webview manipulation requested by the orchestrator side.
    Surface(SurfaceHostCommand),
    /// Fresh panel state, as a JS call to evaluate on the panel page.
    Render(String),
}

impl From<SurfaceHostCommand> for UserEvent {
    fn from(command: SurfaceHostCommand) -> Self {
        UserEvent::Surface(command)
    }
}

/// Commands from the panel page to the orchestrator thread.
#[derive(Debug)]
enum PanelCommand {
    Open(u32),
    Launch,
    Close(String),
    CloseAll,
    Reload(String),
    RefreshProfiles,
    SetSetting { label: String, value: f64 },
    SaveSettings,
    ToggleController,
    ToggleMovement,
    ToggleAntiAfk,
    SelectClass,
    Shutdown,
}

// ─── Orchestrator thread ───

enum Input {
    Command(PanelCommand),
    Signal(SurfaceSignal),
}

async fn run_core(
    mut app: App,
    mut commands: UnboundedReceiver<PanelCommand>,
    mut signals: UnboundedReceiver<SurfaceSignal>,
    proxy: EventLoopProxy<UserEvent>,
) {
    app.startup().await;
    push_render(&app, &proxy);

    // Commands received while a batch open is in flight, replayed in
    // arrival order once it returns.
    let mut deferred: VecDeque<PanelCommand> = VecDeque::new();

    loop {
        let input = if let Some(command) = deferred.pop_front() {
            Input::Command(command)
        } else {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => Input::Command(command),
                    None => break,
                },
                signal = signals.recv() => match signal {
                    Some(signal) => Input::Signal(signal),
                    None => break,
                },
            }
        };

        match input {
            Input::Command(PanelCommand::Shutdown) => {
                app.shutdown().await;
                break;
            }
            Input::Command(PanelCommand::Open(count)) => {
                open_preemptibly(&mut app, count, &mut commands, &mut deferred).await;
            }
            Input::Command(command) => apply_command(&mut app, command).await,
            Input::Signal(signal) => app.orchestrator.handle_signal(signal).await,
        }
        push_render(&app, &proxy);
    }
}

/// Drives a batch open while still draining the command channel, so a
/// Close All (or shutdown) issued mid-open trips the open guard and the
/// creation loop stops at its next step instead of running to completion
/// first. Everything received meanwhile is deferred and replayed after
/// the open returns.
async fn open_preemptibly(
    app: &mut App,
    count: u32,
    commands: &mut UnboundedReceiver<PanelCommand>,
    deferred: &mut VecDeque<PanelCommand>,
) {
    let guard = app.orchestrator.begin_open();
    // Errors are already logged by the orchestrator.
    let open = app.orchestrator.open(count);
    tokio::pin!(open);
    loop {
        tokio::select! {
            _ = &mut open => break,
            command = commands.recv() => {
                let Some(command) = command else {
                    guard.cancel();
                    let _ = open.await;
                    break;
                };
                if matches!(command, PanelCommand::CloseAll | PanelCommand::Shutdown) {
                    guard.cancel();
                }
                deferred.push_back(command);
            }
        }
    }
}

async fn apply_command(app: &mut App, command: PanelCommand) {
    match command {
        // Open and Shutdown are routed in run_core.
        PanelCommand::Open(_) | PanelCommand::Shutdown => {}
        PanelCommand::Launch => {
            if let Err(e) = app.orchestrator.launch().await {
                app.log.error(format!("{}", e));
            }
        }
        PanelCommand::Close(name) => app.orchestrator.close(&name),
        PanelCommand::CloseAll => app.orchestrator.close_all().await,
        PanelCommand::Reload(name) => app.orchestrator.reload(&name),
        PanelCommand::RefreshProfiles => {
            app.refresh_profiles().await;
        }
        PanelCommand::SetSetting { label, value } => {
            if let Err(e) = app.settings.set_by_label(&label, value) {
                app.log.warning(format!("{}", e));
            }
        }
        PanelCommand::SaveSettings => {
            if let Err(e) = app.settings.save().await {
                app.log.error(format!("{}", e));
            }
        }
        PanelCommand::ToggleController => {
            if let Err(e) = app.automation.toggle_controller().await {
                app.log.error(format!("{}", e));
            }
        }
        PanelCommand::ToggleMovement => {
            if let Err(e) = app.automation.toggle_movement().await {
                app.log.error(format!("{}", e));
            }
        }
        PanelCommand::ToggleAntiAfk => {
            if let Err(e) = app.automation.toggle_anti_afk().await {
                app.log.error(format!("{}", e));
            }
        }
        PanelCommand::SelectClass => {
            if let Err(e) = app.automation.select_class().await {
                app.log.error(format!("{}", e));
            }
        }
    }
}

fn push_render(app: &App, proxy: &EventLoopProxy<UserEvent>) {
    let _ = proxy.send_event(UserEvent::Render(render_script(app)));
}

/// Serializes everything the panel page renders into one applyState call.
fn render_script(app: &App) -> String {
    let view = app.orchestrator.view();
    let automation = app.automation.view();
    let slider = app.profiles.slider(1);

    let sessions: Vec<serde_json::Value> = app
        .orchestrator
        .registry()
        .all()
        .iter()
        .map(|s| {
            serde_json::json!({
                "name": s.name,
                "title": s.profile.title(),
                "status": s.status.label(),
                "attention": s.status.needs_attention(),
            })
        })
        .collect();

    let log: Vec<serde_json::Value> = app
        .log
        .snapshot()
        .iter()
        .rev()
        .take(200)
        .map(|e| {
            serde_json::json!({
                "ts": e.timestamp,
                "class": e.level.class(),
                "message": e.message,
            })
        })
        .collect();

    let state = serde_json::json!({
        "primaryLabel": view.primary_button_label,
        "primaryIsLaunch": view.primary_button_label != crate::lobby::projection::OPEN_SESSIONS_LABEL,
        "closeAllEnabled": view.close_button_enabled,
        "emptyState": view.empty_state_visible,
        "activeCount": view.active_count,
        "profilesCounter": app.profiles.counter_text(),
        "sliderMax": slider.max,
        "sliderDisabled": slider.disabled,
        "sessions": sessions,
        "settings": app.settings.values(),
        "automation": {
            "connectLabel": automation.connect_label,
            "movementLabel": automation.movement_label,
            "antiAfkLabel": automation.anti_afk_label,
            "movementEnabled": automation.movement_enabled,
            "antiAfkEnabled": automation.anti_afk_enabled,
            "classEnabled": automation.class_select_enabled,
        },
        "log": log,
    });
    format!("if(window.applyState)applyState({})", state)
}

// ─── IPC handler ───

fn handle_ipc(message: &str, commands: &UnboundedSender<PanelCommand>) {
    let Ok(msg) = serde_json::from_str::<serde_json::Value>(message) else {
        return;
    };
    let Some(cmd) = msg.get("cmd").and_then(|v| v.as_str()) else {
        return;
    };

    let command = match cmd {
        "open" => {
            let count = msg.get("count").and_then(|v| v.as_u64()).unwrap_or(1) as u32;
            Some(PanelCommand::Open(count))
        }
        "launch" => Some(PanelCommand::Launch),
        "close" => msg
            .get("name")
            .and_then(|v| v.as_str())
            .map(|name| PanelCommand::Close(name.to_string())),
        "close_all" => Some(PanelCommand::CloseAll),
        "reload" => msg
            .get("name")
            .and_then(|v| v.as_str())
            .map(|name| PanelCommand::Reload(name.to_string())),
        "refresh_profiles" => Some(PanelCommand::RefreshProfiles),
        "set_setting" => {
            let label = msg.get("label").and_then(|v| v.as_str());
            let value = msg.get("value").and_then(|v| v.as_f64());
            match (label, value) {
                (Some(label), Some(value)) => Some(PanelCommand::SetSetting {
                    label: label.to_string(),
                    value,
                }),
                _ => None,
            }
        }
        "save_settings" => Some(PanelCommand::SaveSettings),
        "toggle_controller" => Some(PanelCommand::ToggleController),
        "toggle_movement" => Some(PanelCommand::ToggleMovement),
        "toggle_anti_afk" => Some(PanelCommand::ToggleAntiAfk),
        "select_class" => Some(PanelCommand::SelectClass),
        _ => None,
    };

    if let Some(command) = command {
        let _ = commands.send(command);
    }
}

// ─── Panel page ───

fn panel_html() -> String {
    let mut html = String::with_capacity(8000);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><style>");
    html.push_str(":root{--bg:#0d1117;--panel:#161b22;--fg:#e6edf3;--muted:#7d8590;--border:#30363d;--accent:#1f6feb;--success:#3fb950;--warning:#d29922;--danger:#f85149;--font:-apple-system,BlinkMacSystemFont,\"Segoe UI\",Helvetica,Arial,sans-serif}");
    html.push_str("*{margin:0;padding:0;box-sizing:border-box}body{font-family:var(--font);background:var(--bg);color:var(--fg);padding:16px;user-select:none}");
    html.push_str("h2{font-size:14px;margin:12px 0 6px;color:var(--muted)}button{background:var(--accent);color:#fff;border:none;border-radius:6px;padding:8px 14px;margin:2px;cursor:pointer}button:disabled{opacity:.4;cursor:default}");
    html.push_str("button.danger{background:var(--danger)}#sessions div{padding:4px 8px;border:1px solid var(--border);border-radius:6px;margin:2px 0;display:flex;justify-content:space-between;align-items:center}");
    html.push_str("#sessions .attention{border-color:var(--danger)}#log{height:180px;overflow-y:auto;background:var(--panel);border:1px solid var(--border);border-radius:6px;padding:6px;font-size:12px}");
    html.push_str(".info{color:var(--fg)}.success{color:var(--success)}.warning{color:var(--warning)}.error{color:var(--danger)}input[type=range]{width:200px}");
    html.push_str("</style></head><body>");
    html.push_str(concat!(
        "<h2 id=\"profiles-counter\">Available Profiles: 0/20</h2>",
        "<div><input id=\"bot-count\" type=\"range\" min=\"1\" max=\"1\" value=\"1\"/>",
        "<span id=\"bot-count-value\">1</span></div>",
        "<div><button id=\"primary\">Open Sessions</button>",
        "<button id=\"close-all\" class=\"danger\" disabled>Close All</button>",
        "<button id=\"refresh\">Refresh Profiles</button></div>",
        "<div id=\"empty-state\">No active sessions</div>",
        "<div id=\"sessions\"></div>",
        "<h2>Controller</h2>",
        "<div><button id=\"controller\">Connect Controller</button>",
        "<button id=\"movement\" disabled>Start Movement</button>",
        "<button id=\"anti-afk\" disabled>Start Anti-AFK</button>",
        "<button id=\"class-select\" disabled>Select Class</button></div>",
        "<h2>Settings</h2><div id=\"settings\"></div>",
        "<div><button id=\"save-settings\">Save Settings</button></div>",
        "<h2>Activity</h2><div id=\"log\"></div>",
    ));
    html.push_str("<script>");
    html.push_str(PANEL_JS);
    html.push_str("</script></body></html>");
    html
}

const PANEL_JS: &str = r#"
function send(cmd,args){window.ipc.postMessage(JSON.stringify(Object.assign({cmd:cmd},args||{})))}
var el=function(id){return document.getElementById(id)};
var launchMode=false;
el('primary').addEventListener('click',function(){
  if(launchMode)send('launch');
  else send('open',{count:parseInt(el('bot-count').value,10)});
});
el('close-all').addEventListener('click',function(){send('close_all')});
el('refresh').addEventListener('click',function(){send('refresh_profiles')});
el('controller').addEventListener('click',function(){send('toggle_controller')});
el('movement').addEventListener('click',function(){send('toggle_movement')});
el('anti-afk').addEventListener('click',function(){send('toggle_anti_afk')});
el('class-select').addEventListener('click',function(){send('select_class')});
el('save-settings').addEventListener('click',function(){send('save_settings')});
el('bot-count').addEventListener('input',function(){el('bot-count-value').textContent=this.value});
var sliderLabels={turn_speed_s:'Turn Speed (s)',hold_w_duration:'Hold W Duration',anti_afk_interval:'Anti AFK Interval'};
function applyState(s){
  launchMode=s.primaryIsLaunch;
  el('primary').textContent=s.primaryLabel;
  el('close-all').disabled=!s.closeAllEnabled;
  el('empty-state').style.display=s.emptyState?'block':'none';
  el('profiles-counter').textContent=s.profilesCounter;
  var bc=el('bot-count');bc.max=s.sliderMax;bc.disabled=s.sliderDisabled;
  if(parseInt(bc.value,10)>s.sliderMax)bc.value=s.sliderMax;
  el('bot-count-value').textContent=bc.value;
  var list=el('sessions');list.innerHTML='';
  s.sessions.forEach(function(sess){
    var row=document.createElement('div');
    if(sess.attention)row.className='attention';
    row.innerHTML='<span>'+sess.title+': '+sess.status+'</span>';
    var actions=document.createElement('span');
    if(sess.attention){
      var retry=document.createElement('button');retry.textContent='Reload';
      retry.addEventListener('click',function(){send('reload',{name:sess.name})});
      actions.appendChild(retry);
    }
    var close=document.createElement('button');close.textContent='Close';close.className='danger';
    close.addEventListener('click',function(){send('close',{name:sess.name})});
    actions.appendChild(close);
    row.appendChild(actions);
    list.appendChild(row);
  });
  var auto=s.automation;
  el('controller').textContent=auto.connectLabel;
  el('movement').textContent=auto.movementLabel;el('movement').disabled=!auto.movementEnabled;
  el('anti-afk').textContent=auto.antiAfkLabel;el('anti-afk').disabled=!auto.antiAfkEnabled;
  el('class-select').disabled=!auto.classEnabled;
  var settings=el('settings');settings.innerHTML='';
  Object.keys(s.settings).sort().forEach(function(key){
    var label=sliderLabels[key]||key;
    var row=document.createElement('div');
    var input=document.createElement('input');
    input.type='number';input.step='0.1';input.value=s.settings[key];
    input.addEventListener('change',function(){send('set_setting',{label:label,value:parseFloat(this.value)})});
    row.appendChild(document.createTextNode(label+' '));
    row.appendChild(input);
    settings.appendChild(row);
  });
  var logPane=el('log');logPane.innerHTML='';
  s.log.forEach(function(entry){
    var line=document.createElement('div');
    line.className=entry.class;
    line.textContent=entry.message;
    logPane.appendChild(line);
  });
}
send('refresh_profiles');
"#;

// ─── Session windows ───

struct SessionWindow {
    window: Window,
    webview: WebView,
    // Owns the per-profile data directory backing the webview.
    _context: WebContext,
}

struct SessionHost {
    windows: HashMap<String, SessionWindow>,
    names_by_window: HashMap<WindowId, String>,
    signals: SignalSender,
}

impl SessionHost {
    fn new(signals: SignalSender) -> Self {
        Self {
            windows: HashMap::new(),
            names_by_window: HashMap::new(),
            signals,
        }
    }

    fn apply(&mut self, command: SurfaceHostCommand, target: &EventLoopWindowTarget<UserEvent>) {
        match command {
            SurfaceHostCommand::Create {
                name,
                title,
                partition_dir,
                url,
            } => self.create(name, title, partition_dir, url, target),
            SurfaceHostCommand::Navigate { name, url } => {
                if let Some(session) = self.windows.get(&name) {
                    let _ = session.webview.load_url(&url);
                }
            }
            SurfaceHostCommand::Reload { name } => {
                if let Some(session) = self.windows.get(&name) {
                    let _ = session.webview.reload();
                }
            }
            SurfaceHostCommand::Remove { name } => {
                if let Some(session) = self.windows.remove(&name) {
                    self.names_by_window.remove(&session.window.id());
                }
            }
        }
    }

    fn create(
        &mut self,
        name: String,
        title: String,
        partition_dir: PathBuf,
        url: String,
        target: &EventLoopWindowTarget<UserEvent>,
    ) {
        let window = match WindowBuilder::new()
            .with_title(&title)
            .with_inner_size(tao::dpi::LogicalSize::new(960.0, 640.0))
            .build(target)
        {
            Ok(window) => window,
            Err(e) => {
                let _ = self.signals.send(SurfaceSignal {
                    session: name,
                    event: SurfaceEvent::LoadFailed {
                        code: 0,
                        description: format!("window creation failed: {}", e),
                    },
                });
                return;
            }
        };

        let mut context = WebContext::new(Some(partition_dir));
        let load_signals = self.signals.clone();
        let load_name = name.clone();
        let builder = WebViewBuilder::new_with_web_context(&mut context)
            .with_url(&url)
            .with_on_page_load_handler(move |event, _url| {
                let event = match event {
                    PageLoadEvent::Started => SurfaceEvent::LoadingStarted,
                    PageLoadEvent::Finished => SurfaceEvent::Ready,
                };
                let _ = load_signals.send(SurfaceSignal {
                    session: load_name.clone(),
                    event,
                });
            });

        #[cfg(target_os = "linux")]
        let webview = {
            use tao::platform::unix::WindowExtUnix;
            use wry::WebViewBuilderExtUnix;
            window.default_vbox().and_then(|vbox| builder.build_gtk(vbox).ok())
        };

        #[cfg(not(target_os = "linux"))]
        let webview = builder.build(&window).ok();

        let Some(webview) = webview else {
            let _ = self.signals.send(SurfaceSignal {
                session: name,
                event: SurfaceEvent::Crashed,
            });
            return;
        };

        self.names_by_window.insert(window.id(), name.clone());
        self.windows.insert(
            name,
            SessionWindow {
                window,
                webview,
                _context: context,
            },
        );
    }
}

// ─── Main entry point ───

pub fn run() {
    let log = SharedLog::new();
    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let (command_tx, command_rx) = unbounded_channel();
    let (signal_tx, signal_rx) = unbounded_channel();

    let partition_root = std::env::temp_dir().join("lobbydeck-partitions");
    let backend: Arc<dyn crate::backend::client::LobbyBackend> =
        Arc::new(HttpBackendClient::localhost());
    let factory = WebviewSurfaceFactory::new(proxy.clone(), partition_root);
    let supervisor = supervisor_from_env();

    let app = App::new(
        backend,
        Box::new(factory),
        Arc::new(FixedIntervalPacer::default()),
        signal_tx.clone(),
        supervisor,
        log,
    );

    let core_proxy = proxy.clone();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("Failed to start tokio runtime");
        runtime.block_on(run_core(app, command_rx, signal_rx, core_proxy));
    });

    let panel_window = WindowBuilder::new()
        .with_title("LobbyDeck")
        .with_inner_size(tao::dpi::LogicalSize::new(520.0, 820.0))
        .build(&event_loop)
        .expect("Failed to create panel window");
    let panel_window_id = panel_window.id();

    let ipc_commands = command_tx.clone();
    let builder = WebViewBuilder::new()
        .with_custom_protocol("ld".into(), move |_wv_id, _request| {
            wry::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body(panel_html().into_bytes().into())
                .unwrap()
        })
        .with_url("ld://localhost/panel")
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            handle_ipc(msg.body().as_str(), &ipc_commands);
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let panel_webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = panel_window.default_vbox().expect("Failed to get GTK vbox");
        builder.build_gtk(vbox).expect("Failed to create panel WebView")
    };

    #[cfg(not(target_os = "linux"))]
    let panel_webview = builder.build(&panel_window).expect("Failed to create panel WebView");

    let mut host = SessionHost::new(signal_tx);

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                window_id,
                ..
            } => {
                if window_id == panel_window_id {
                    let _ = command_tx.send(PanelCommand::Shutdown);
                    *control_flow = ControlFlow::Exit;
                } else if let Some(name) = host.names_by_window.get(&window_id).cloned() {
                    let _ = command_tx.send(PanelCommand::Close(name));
                }
            }

            Event::UserEvent(UserEvent::Surface(command)) => {
                host.apply(command, target);
            }

            Event::UserEvent(UserEvent::Render(script)) => {
                let _ = panel_webview.evaluate_script(&script);
            }

            _ => {}
        }
    });
}

fn supervisor_from_env() -> Option<BackendSupervisor> {
    std::env::var("LOBBYDECK_BACKEND_CMD").ok().map(|cmd| {
        let mut parts = cmd.split_whitespace().map(String::from);
        let program = parts.next().unwrap_or_default();
        BackendSupervisor::new(program, parts.collect())
    })
}
