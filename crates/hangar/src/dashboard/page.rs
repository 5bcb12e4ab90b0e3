//! Server-rendered dashboard page.
//!
//! One static HTML document: title, control hints, about text, the launch
//! button, statistics, and an inline SVG chart of the fixed speed series.
//! The only dynamic part is a small fetch() call wired to the launch button.

use crate::config::Config;

use super::stats::{speed_polyline_points, FlightStats, SPEED_SERIES};

/// Chart dimensions for the speed polyline.
const CHART_WIDTH: u32 = 400;
const CHART_HEIGHT: u32 = 160;

/// Render the full dashboard HTML document.
#[must_use]
pub fn render(config: &Config) -> String {
    let stats = FlightStats::current();
    let points = speed_polyline_points(CHART_WIDTH, CHART_HEIGHT);
    let game_url = &config.game.url;
    let series = SPEED_SERIES
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Flight Simulator</title>
<style>
  body {{ font-family: sans-serif; margin: 0; display: flex; }}
  aside {{ width: 240px; background: #f0f2f6; padding: 1rem; min-height: 100vh; }}
  main {{ flex: 1; padding: 1rem 2rem; }}
  h1 {{ border-bottom: 1px solid #ddd; padding-bottom: 0.5rem; }}
  button {{ padding: 0.5rem 1.2rem; font-size: 1rem; cursor: pointer; }}
  #launch-status {{ margin-top: 0.8rem; }}
  .error {{ color: #b00020; }}
  .ok {{ color: #1a7f37; }}
  svg {{ background: #fafafa; border: 1px solid #eee; }}
  footer {{ color: #888; margin-top: 2rem; border-top: 1px solid #ddd; padding-top: 0.5rem; }}
</style>
</head>
<body>
<aside>
  <h2>Controls</h2>
  <ul>
    <li><strong>Arrow Keys</strong>: Control the aircraft</li>
    <li><strong>W/S</strong>: Adjust thrust</li>
    <li><strong>Space</strong>: Fire weapons</li>
    <li><strong>R</strong>: Reload</li>
  </ul>
  <h2>About</h2>
  <p>This is a 3D flight simulator built with Three.js. Use the controls
  to fly the aircraft and explore the world.</p>
</aside>
<main>
  <h1>Flight Simulator</h1>
  <p>Welcome to the Flight Simulator! This application allows you to control
  a 3D aircraft in a virtual environment. Use the controls listed in the
  sidebar to navigate.</p>

  <button id="launch">Launch Flight Simulator</button>
  <div id="launch-status"></div>

  <h2>Statistics</h2>
  <ul>
    <li><strong>Aircraft Speed</strong>: {speed}</li>
    <li><strong>Altitude</strong>: {altitude}</li>
    <li><strong>Health</strong>: {health}</li>
    <li><strong>Ammo</strong>: {ammo}</li>
  </ul>

  <h3>Performance Metrics</h3>
  <p>Speed: [{series}]</p>
  <svg viewBox="-10 -10 {vb_width} {vb_height}" width="{width}" height="{height}">
    <polyline fill="none" stroke="#ff4b4b" stroke-width="2" points="{points}" />
  </svg>

  <footer>Flight Simulator | Created with Three.js</footer>
</main>
<script>
  const button = document.getElementById('launch');
  const status = document.getElementById('launch-status');
  button.addEventListener('click', async () => {{
    status.textContent = 'Launching the Flight Simulator...';
    status.className = '';
    try {{
      const resp = await fetch('/api/launch', {{ method: 'POST' }});
      const body = await resp.json();
      if (resp.ok) {{
        status.textContent = 'Flight Simulator running at ' + body.url;
        status.className = 'ok';
      }} else {{
        status.textContent = 'Error launching the Flight Simulator: ' + body.message;
        status.className = 'error';
      }}
    }} catch (err) {{
      status.textContent = 'Error launching the Flight Simulator: ' + err;
      status.className = 'error';
    }}
  }});
  // The game ends up at {game_url}; the server opens it in a new tab itself.
</script>
</body>
</html>
"##,
        speed = stats.aircraft_speed,
        altitude = stats.altitude,
        health = stats.health,
        ammo = stats.ammo,
        series = series,
        points = points,
        width = CHART_WIDTH,
        height = CHART_HEIGHT,
        vb_width = CHART_WIDTH + 20,
        vb_height = CHART_HEIGHT + 20,
        game_url = game_url,
    )
}
