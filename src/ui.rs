use crate::models::SalesRecord;
use chrono::NaiveDate;

pub fn render_index(records: &[SalesRecord], cutoff: NaiveDate) -> String {
    let first = records
        .first()
        .map_or_else(|| "--".to_string(), |record| record.date.to_string());
    let last = records
        .last()
        .map_or_else(|| "--".to_string(), |record| record.date.to_string());
    INDEX_HTML
        .replace("{{CUTOFF}}", &cutoff.to_string())
        .replace("{{COUNT}}", &records.len().to_string())
        .replace("{{FIRST}}", &first)
        .replace("{{LAST}}", &last)
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Pink Morsel Sales</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Sora:wght@400;600&family=Playfair+Display:wght@600&display=swap');

    :root {
      --bg-1: #fdf3f6;
      --bg-2: #f7d6e2;
      --ink: #2c2330;
      --rose: #d44d7f;
      --slate: #3c4a5d;
      --amber: #dd9a36;
      --moss: #4f9d69;
      --plum: #7a5fa0;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 22px 54px rgba(60, 74, 93, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at 20% 0%, var(--bg-2), transparent 55%),
        linear-gradient(160deg, var(--bg-1), #fbe9ef 55%, #f6eef4 100%);
      color: var(--ink);
      font-family: 'Sora', 'Verdana', sans-serif;
      display: grid;
      place-items: start center;
      padding: 36px 20px 56px;
    }

    .dashboard {
      width: min(920px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 34px;
      display: grid;
      gap: 26px;
    }

    header h1 {
      font-family: 'Playfair Display', 'Georgia', serif;
      font-size: clamp(1.9rem, 4vw, 2.6rem);
      margin: 0 0 4px;
    }

    header .tagline {
      margin: 0;
      color: #6d6470;
      font-size: 0.98rem;
    }

    .facts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 14px;
    }

    .fact {
      background: white;
      border: 1px solid rgba(60, 74, 93, 0.09);
      border-radius: 16px;
      padding: 14px 16px;
    }

    .fact .label {
      display: block;
      font-size: 0.78rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #93889a;
    }

    .fact .value {
      display: block;
      margin-top: 6px;
      font-size: 1.35rem;
      font-weight: 600;
      color: var(--slate);
    }

    .fact .value.rose {
      color: var(--rose);
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      align-items: center;
      gap: 14px;
    }

    .switch {
      display: flex;
      gap: 5px;
      padding: 5px;
      background: rgba(60, 74, 93, 0.08);
      border-radius: 999px;
    }

    .switch button {
      border: none;
      background: transparent;
      border-radius: 999px;
      padding: 8px 16px;
      font: inherit;
      font-weight: 600;
      font-size: 0.88rem;
      color: #756b7c;
      cursor: pointer;
    }

    .switch button.on {
      background: white;
      color: var(--rose);
      box-shadow: 0 6px 14px rgba(212, 77, 127, 0.18);
    }

    .chart-card {
      background: white;
      border: 1px solid rgba(60, 74, 93, 0.09);
      border-radius: 18px;
      padding: 18px;
    }

    #chart {
      width: 100%;
      height: 300px;
      display: block;
    }

    #chart text {
      font-family: 'Sora', 'Verdana', sans-serif;
    }

    .grid-line {
      stroke: rgba(60, 74, 93, 0.12);
    }

    .axis-label {
      fill: #857b8b;
      font-size: 11px;
    }

    .cutoff-line {
      stroke: #c2352b;
      stroke-width: 2;
      stroke-dasharray: 6 5;
    }

    .cutoff-label {
      fill: #c2352b;
      font-size: 11px;
      font-weight: 600;
    }

    .legend {
      display: flex;
      flex-wrap: wrap;
      gap: 14px;
      font-size: 0.85rem;
      color: #5d5463;
    }

    .legend .swatch {
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 3px;
      margin-right: 6px;
      vertical-align: baseline;
    }

    .conclusion {
      background: rgba(212, 77, 127, 0.07);
      border-left: 4px solid var(--rose);
      border-radius: 0 14px 14px 0;
      padding: 14px 18px;
      margin: 0;
      font-size: 1.02rem;
      line-height: 1.5;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.92rem;
      color: #6d6470;
    }

    .status[data-type='error'] {
      color: #c2352b;
    }

    .footnote {
      margin: 0;
      color: #7b7280;
      font-size: 0.88rem;
    }

    @media (max-width: 640px) {
      .dashboard {
        padding: 26px 20px;
      }
    }
  </style>
</head>
<body>
  <main class="dashboard">
    <header>
      <h1>Pink Morsel Sales</h1>
      <p class="tagline">Daily and cumulative sales around the price increase on {{CUTOFF}}.</p>
    </header>

    <section class="facts">
      <div class="fact">
        <span class="label">Records</span>
        <span class="value">{{COUNT}}</span>
      </div>
      <div class="fact">
        <span class="label">First date</span>
        <span class="value">{{FIRST}}</span>
      </div>
      <div class="fact">
        <span class="label">Last date</span>
        <span class="value">{{LAST}}</span>
      </div>
      <div class="fact">
        <span class="label">Price increase</span>
        <span class="value rose">{{CUTOFF}}</span>
      </div>
    </section>

    <section class="controls">
      <div class="switch" id="series-switch" role="tablist">
        <button type="button" class="on" data-series="daily" role="tab" aria-selected="true">Daily</button>
        <button type="button" data-series="cumulative" role="tab" aria-selected="false">Cumulative</button>
      </div>
      <div class="switch" id="region-switch" role="tablist">
        <button type="button" class="on" data-region="all" role="tab" aria-selected="true">All regions</button>
      </div>
    </section>

    <section class="chart-card">
      <svg id="chart" viewBox="0 0 640 300" aria-label="Sales chart" role="img"></svg>
    </section>

    <div class="legend" id="legend"></div>

    <p class="conclusion" id="conclusion">Loading...</p>
    <div class="status" id="status"></div>
    <p class="footnote">The dashed red line marks the pink morsel price increase ({{CUTOFF}}). Sales are recomputed from the loaded records on every change.</p>
  </main>

  <script>
    const CUTOFF = '{{CUTOFF}}';
    const PALETTE = ['#d44d7f', '#3c4a5d', '#dd9a36', '#4f9d69', '#7a5fa0'];

    const chartEl = document.getElementById('chart');
    const legendEl = document.getElementById('legend');
    const conclusionEl = document.getElementById('conclusion');
    const statusEl = document.getElementById('status');
    const seriesSwitch = document.getElementById('series-switch');
    const regionSwitch = document.getElementById('region-switch');

    let selectedSeries = 'daily';
    let selectedRegion = 'all';

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const markActive = (container, attribute, value) => {
      for (const button of container.querySelectorAll('button')) {
        const on = button.dataset[attribute] === value;
        button.classList.toggle('on', on);
        button.setAttribute('aria-selected', String(on));
      }
    };

    const renderLegend = (seriesList) => {
      if (seriesList.length === 1 && !seriesList[0].region) {
        legendEl.innerHTML = '';
        return;
      }
      legendEl.innerHTML = seriesList
        .map((series, index) => {
          const color = PALETTE[index % PALETTE.length];
          const name = series.region || 'all regions';
          return `<span><span class='swatch' style='background:${color}'></span>${name}</span>`;
        })
        .join('');
    };

    const renderChart = (seriesList) => {
      const dates = [...new Set(seriesList.flatMap((s) => s.points.map((p) => p.date)))].sort();
      if (!dates.length) {
        chartEl.innerHTML = `<text class='axis-label' x='50%' y='50%' text-anchor='middle'>No data</text>`;
        return;
      }

      const width = 640;
      const height = 300;
      const left = 52;
      const right = 20;
      const top = 26;
      const bottom = 40;

      const values = seriesList.flatMap((s) => s.points.map((p) => p.value));
      let min = Math.min(0, ...values);
      let max = Math.max(0, ...values);
      if (min === max) {
        max += 1;
      }
      const range = max - min;

      const xStep = dates.length > 1 ? (width - left - right) / (dates.length - 1) : 0;
      const x = (date) => left + dates.indexOf(date) * xStep;
      const y = (value) => height - bottom - ((value - min) / range) * (height - top - bottom);

      let parts = '';
      const ticks = 4;
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + (range * i) / ticks;
        const yPos = y(value).toFixed(1);
        parts += `<line class='grid-line' x1='${left}' y1='${yPos}' x2='${width - right}' y2='${yPos}' />`;
        parts += `<text class='axis-label' x='${left - 9}' y='${Number(yPos) + 4}' text-anchor='end'>$${Math.round(value)}</text>`;
      }

      const labelEvery = Math.max(1, Math.ceil(dates.length / 9));
      dates.forEach((date, index) => {
        if (index % labelEvery === 0) {
          parts += `<text class='axis-label' x='${x(date).toFixed(1)}' y='${height - bottom + 18}' text-anchor='middle'>${date.slice(5)}</text>`;
        }
      });

      seriesList.forEach((series, index) => {
        const color = PALETTE[index % PALETTE.length];
        const path = series.points
          .map((point, i) => `${i === 0 ? 'M' : 'L'} ${x(point.date).toFixed(1)} ${y(point.value).toFixed(1)}`)
          .join(' ');
        parts += `<path d='${path}' fill='none' stroke='${color}' stroke-width='2.5' />`;
        if (series.points.length <= 40) {
          for (const point of series.points) {
            parts += `<circle cx='${x(point.date).toFixed(1)}' cy='${y(point.value).toFixed(1)}' r='3' fill='white' stroke='${color}' stroke-width='2' />`;
          }
        }
      });

      const markerDate = dates.find((date) => date >= CUTOFF);
      if (markerDate) {
        const xPos = x(markerDate).toFixed(1);
        parts += `<line class='cutoff-line' x1='${xPos}' y1='${top - 8}' x2='${xPos}' y2='${height - bottom}' />`;
        parts += `<text class='cutoff-label' x='${xPos}' y='${top - 12}' text-anchor='middle'>Price increase</text>`;
      }

      chartEl.innerHTML = parts;
    };

    const loadView = async () => {
      const query = new URLSearchParams({ series: selectedSeries, region: selectedRegion });
      const res = await fetch(`/api/view?${query}`);
      if (!res.ok) {
        const body = await res.json().catch(() => ({}));
        throw new Error(body.error || 'Unable to load the view');
      }
      const view = await res.json();
      renderChart(view.series);
      renderLegend(view.series);
      conclusionEl.textContent = view.conclusion;
    };

    const refresh = () => {
      setStatus('Recomputing...', '');
      loadView()
        .then(() => setStatus('', ''))
        .catch((err) => setStatus(err.message, 'error'));
    };

    const buildRegionButtons = (regions) => {
      for (const region of regions) {
        const button = document.createElement('button');
        button.type = 'button';
        button.dataset.region = region;
        button.setAttribute('role', 'tab');
        button.textContent = region;
        regionSwitch.appendChild(button);
      }
    };

    seriesSwitch.addEventListener('click', (event) => {
      const button = event.target.closest('button');
      if (!button) {
        return;
      }
      selectedSeries = button.dataset.series;
      markActive(seriesSwitch, 'series', selectedSeries);
      refresh();
    });

    regionSwitch.addEventListener('click', (event) => {
      const button = event.target.closest('button');
      if (!button) {
        return;
      }
      selectedRegion = button.dataset.region;
      markActive(regionSwitch, 'region', selectedRegion);
      refresh();
    });

    fetch('/api/regions')
      .then((res) => (res.ok ? res.json() : { regions: [] }))
      .then((body) => buildRegionButtons(body.regions))
      .catch(() => {})
      .finally(refresh);
  </script>
</body>
</html>
"##;
