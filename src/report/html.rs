//! HTML dashboard generation with D3.js chart rendering

use std::io::{self, Write};

use crate::report::Dashboard;

pub fn write<W: Write>(writer: &mut W, dashboard: &Dashboard) -> io::Result<()> {
    let json_data = serde_json::to_string(dashboard)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    write!(writer, r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Subtitle Emotion Dashboard</title>
    <script src="https://d3js.org/d3.v7.min.js"></script>
    <style>
        :root {{
            --bg: #0d1117;
            --card: #161b22;
            --border: #30363d;
            --text: #e6edf3;
            --dim: #7d8590;
            --accent: #58a6ff;
            --accent2: #a371f7;
        }}
        * {{ box-sizing: border-box; margin: 0; padding: 0; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.5;
        }}
        .container {{ max-width: 1200px; margin: 0 auto; padding: 2rem; }}
        .header {{
            display: flex;
            align-items: baseline;
            gap: 1rem;
            margin-bottom: 2rem;
            padding-bottom: 1rem;
            border-bottom: 1px solid var(--border);
        }}
        .logo {{
            font-size: 2rem;
            font-weight: 800;
            background: linear-gradient(135deg, var(--accent), var(--accent2));
            -webkit-background-clip: text;
            -webkit-text-fill-color: transparent;
        }}
        .subtitle {{ color: var(--dim); font-size: 1rem; }}
        .charts {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(480px, 1fr)); gap: 1.5rem; }}
        .chart-card {{
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 12px;
            padding: 1.5rem;
        }}
        .chart-title {{ font-size: 1rem; font-weight: 600; margin-bottom: 1rem; color: var(--dim); }}
        .axis text {{ fill: var(--dim); font-size: 11px; }}
        .axis line, .axis path {{ stroke: var(--border); }}
    </style>
</head>
<body>
<div class="container">
    <div class="header">
        <div class="logo">yasea</div>
        <div class="subtitle">{count} classified lines</div>
    </div>
    <div class="charts" id="charts"></div>
</div>
<script>
const DATA = {data};
</script>
"#,
        count = dashboard.record_count,
        data = json_data,
    )?;

    writer.write_all(RENDER_SCRIPT.as_bytes())?;
    write!(writer, "</body>\n</html>\n")
}

// Client-side renderers, one per chart kind. Plain D3, no framework.
const RENDER_SCRIPT: &str = r#"<script>
const W = 460, H = 300, M = {top: 10, right: 20, bottom: 50, left: 40};
const palette = d3.scaleOrdinal(d3.schemeTableau10);

function card(title) {
    const div = d3.select('#charts').append('div').attr('class', 'chart-card');
    div.append('div').attr('class', 'chart-title').text(title);
    return div.append('svg').attr('viewBox', `0 0 ${W} ${H}`).attr('width', '100%');
}

function renderPie(chart) {
    const svg = card(chart.title);
    const r = Math.min(W, H) / 2 - 20;
    const g = svg.append('g').attr('transform', `translate(${W / 2},${H / 2})`);
    const arcs = d3.pie().value(d => d.value)(chart.categories);
    const arc = d3.arc().innerRadius(0).outerRadius(r);
    g.selectAll('path').data(arcs).join('path')
        .attr('d', arc)
        .attr('fill', d => palette(d.data.name))
        .attr('stroke', '#0d1117');
    g.selectAll('text').data(arcs).join('text')
        .attr('transform', d => `translate(${arc.centroid(d)})`)
        .attr('text-anchor', 'middle')
        .attr('fill', '#e6edf3')
        .attr('font-size', '11px')
        .text(d => d.data.value > 0 ? d.data.name : '');
}

function renderRadar(chart) {
    const svg = card(chart.title);
    const cats = chart.categories;
    if (!cats.length) return;
    const r = Math.min(W, H) / 2 - 30;
    const cx = W / 2, cy = H / 2;
    const maxValue = d3.max(cats, d => d.value) || 1;
    const angle = i => (Math.PI * 2 * i) / cats.length - Math.PI / 2;
    const point = (i, v) => [
        cx + Math.cos(angle(i)) * (v / maxValue) * r,
        cy + Math.sin(angle(i)) * (v / maxValue) * r,
    ];
    // rings
    for (const t of [0.25, 0.5, 0.75, 1]) {
        svg.append('circle').attr('cx', cx).attr('cy', cy).attr('r', r * t)
            .attr('fill', 'none').attr('stroke', '#30363d');
    }
    // spokes and labels
    cats.forEach((c, i) => {
        const [x, y] = point(i, maxValue);
        svg.append('line').attr('x1', cx).attr('y1', cy).attr('x2', x).attr('y2', y)
            .attr('stroke', '#30363d');
        svg.append('text')
            .attr('x', cx + Math.cos(angle(i)) * (r + 14))
            .attr('y', cy + Math.sin(angle(i)) * (r + 14))
            .attr('text-anchor', 'middle')
            .attr('fill', '#7d8590')
            .attr('font-size', '11px')
            .text(`${c.name} (${c.value})`);
    });
    const polygon = cats.map((c, i) => point(i, c.value));
    svg.append('polygon')
        .attr('points', polygon.map(p => p.join(',')).join(' '))
        .attr('fill', 'rgba(88, 166, 255, 0.25)')
        .attr('stroke', '#58a6ff')
        .attr('stroke-width', 2);
}

function renderLine(chart) {
    const svg = card(chart.title);
    const pts = chart.points;
    if (!pts.length) return;
    const x = d3.scalePoint().domain(pts.map(p => p.label)).range([M.left, W - M.right]);
    const y = d3.scaleLinear().domain([0, d3.max(pts, p => p.count) || 1]).nice()
        .range([H - M.bottom, M.top]);
    svg.append('g').attr('class', 'axis')
        .attr('transform', `translate(0,${H - M.bottom})`)
        .call(d3.axisBottom(x))
        .selectAll('text').attr('transform', 'rotate(-45)').attr('text-anchor', 'end');
    svg.append('g').attr('class', 'axis')
        .attr('transform', `translate(${M.left},0)`)
        .call(d3.axisLeft(y).ticks(5));
    const line = d3.line().x(p => x(p.label)).y(p => y(p.count));
    svg.append('path').datum(pts)
        .attr('d', line)
        .attr('fill', 'none')
        .attr('stroke', '#f85149')
        .attr('stroke-width', 2);
    svg.selectAll('circle').data(pts).join('circle')
        .attr('cx', p => x(p.label)).attr('cy', p => y(p.count)).attr('r', 3.5)
        .attr('fill', '#f85149');
}

function renderBar(chart) {
    const svg = card(chart.title);
    const cats = chart.categories;
    if (!cats.length) return;
    const x = d3.scaleBand().domain(cats.map(c => c.name))
        .range([M.left, W - M.right]).padding(0.25);
    const y = d3.scaleLinear().domain([0, d3.max(cats, c => c.value) || 1]).nice()
        .range([H - M.bottom, M.top]);
    svg.append('g').attr('class', 'axis')
        .attr('transform', `translate(0,${H - M.bottom})`)
        .call(d3.axisBottom(x))
        .selectAll('text').attr('transform', 'rotate(-45)').attr('text-anchor', 'end');
    svg.append('g').attr('class', 'axis')
        .attr('transform', `translate(${M.left},0)`)
        .call(d3.axisLeft(y).ticks(5));
    svg.selectAll('rect').data(cats).join('rect')
        .attr('x', c => x(c.name))
        .attr('y', c => y(c.value))
        .attr('width', x.bandwidth())
        .attr('height', c => y(0) - y(c.value))
        .attr('fill', c => palette(c.name));
}

for (const chart of DATA.charts) {
    if (chart.kind === 'pie') renderPie(chart);
    else if (chart.kind === 'radar') renderRadar(chart);
    else if (chart.kind === 'line') renderLine(chart);
    else if (chart.kind === 'bar') renderBar(chart);
}
</script>
"#;
