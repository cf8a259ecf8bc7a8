//! Embedded web assets for the diagram viewer

use super::data::GraphData;

/// Placeholder replaced by the serialized frame in static exports.
const STATIC_DATA_MARKER: &str = "/*__JSONMAP_STATIC_DATA__*/null";

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>jsonmap</title>
    <script src="https://d3js.org/d3.v7.min.js"></script>
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
            background: #1a1a2e;
            color: #eee;
            overflow: hidden;
        }

        #container {
            display: flex;
            height: 100vh;
        }

        #graph {
            flex: 1;
            background: #16213e;
        }

        #sidebar {
            width: 300px;
            background: #1a1a2e;
            border-left: 1px solid #333;
            padding: 20px;
            overflow-y: auto;
        }

        h1 {
            font-size: 1.4em;
            margin-bottom: 10px;
            color: #00d9ff;
        }

        h2 {
            font-size: 1.0em;
            margin: 18px 0 8px;
            color: #888;
            text-transform: uppercase;
            letter-spacing: 1px;
        }

        .stat {
            display: flex;
            justify-content: space-between;
            padding: 6px 0;
            border-bottom: 1px solid #333;
        }

        .stat-value {
            color: #00d9ff;
            font-weight: bold;
        }

        .controls {
            display: flex;
            flex-direction: column;
            gap: 10px;
        }

        .controls label {
            display: flex;
            align-items: center;
            justify-content: space-between;
            gap: 8px;
            font-size: 0.9em;
        }

        .controls select, .controls input[type="search"] {
            background: #16213e;
            color: #eee;
            border: 1px solid #444;
            border-radius: 4px;
            padding: 4px 6px;
        }

        .controls input[type="range"] {
            flex: 1;
        }

        .buttons {
            display: flex;
            flex-wrap: wrap;
            gap: 6px;
        }

        button {
            background: #0f3460;
            color: #eee;
            border: 1px solid #00d9ff55;
            border-radius: 4px;
            padding: 5px 10px;
            cursor: pointer;
        }

        button:hover {
            background: #00d9ff33;
        }

        body.static .interactive {
            display: none;
        }

        /* SVG styles */
        .node rect.body {
            stroke: #444;
            stroke-width: 1.5px;
        }

        .node.object rect.body {
            fill: #1f2b4d;
        }

        .node.array rect.body {
            fill: #27304f;
            stroke-dasharray: 4, 2;
        }

        .node.selected rect.body {
            stroke: #00d9ff;
            stroke-width: 3px;
        }

        .node.match rect.body {
            stroke: #ffe66d;
            stroke-width: 2.5px;
        }

        .node text {
            font-size: 12px;
            fill: #eee;
            pointer-events: none;
        }

        .node text.title {
            font-weight: bold;
            fill: #00d9ff;
        }

        .node text.key {
            fill: #95e1d3;
        }

        .node .toggle {
            cursor: pointer;
        }

        .node .toggle circle {
            fill: #0f3460;
            stroke: #00d9ff;
        }

        .node .toggle text {
            font-size: 11px;
            text-anchor: middle;
            fill: #00d9ff;
        }

        .link {
            fill: none;
            stroke: #555;
            stroke-width: 1.5px;
        }

        .link.highlighted {
            stroke: #00d9ff;
            stroke-width: 2.5px;
            stroke-dasharray: 6, 4;
            animation: dash 0.6s linear infinite;
        }

        @keyframes dash {
            to { stroke-dashoffset: -10; }
        }
    </style>
</head>
<body>
    <div id="container">
        <div id="graph"></div>
        <div id="sidebar">
            <h1>jsonmap</h1>

            <h2>Document</h2>
            <div class="stat"><span>Depth</span><span class="stat-value" id="stat-depth">-</span></div>
            <div class="stat"><span>Nodes</span><span class="stat-value" id="stat-nodes">-</span></div>
            <div class="stat"><span>Visible</span><span class="stat-value" id="stat-visible">-</span></div>
            <div class="stat"><span>Properties</span><span class="stat-value" id="stat-props">-</span></div>
            <div class="stat"><span>Size</span><span class="stat-value" id="stat-size">-</span></div>

            <div class="interactive">
                <h2>View</h2>
                <div class="controls">
                    <label>Direction
                        <select id="direction">
                            <option value="lr">Left to right</option>
                            <option value="tb">Top to bottom</option>
                        </select>
                    </label>
                    <label>Node size
                        <select id="size-mode">
                            <option value="compact">Compact</option>
                            <option value="medium">Medium</option>
                            <option value="expanded">Expanded</option>
                        </select>
                    </label>
                    <label>Level <span id="level-value">all</span></label>
                    <input type="range" id="level" min="0" max="1" value="1">
                    <div class="buttons">
                        <button id="collapse-all">Collapse all</button>
                        <button id="expand-all">Expand all</button>
                        <button id="reorganize">Reorganize</button>
                    </div>
                </div>

                <h2>Search</h2>
                <div class="controls">
                    <input type="search" id="search" placeholder="key, value or label">
                    <div class="stat"><span>Matches</span><span class="stat-value" id="stat-matches">0</span></div>
                </div>
            </div>
        </div>
    </div>

    <script>
        const STATIC_DATA = /*__JSONMAP_STATIC_DATA__*/null;
        const SHOW_ALL = 999;

        let svg, zoom, root, linkLayer, nodeLayer;
        let frame = null;

        async function post(url, body) {
            const response = await fetch(url, {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify(body)
            });
            return response.json();
        }

        async function act(action) {
            if (STATIC_DATA) return;
            render(await post('/api/action', action));
        }

        async function refresh() {
            const response = await fetch('/api/graph');
            render(await response.json());
        }

        function setup() {
            const container = document.getElementById('graph');
            svg = d3.select('#graph')
                .append('svg')
                .attr('width', container.clientWidth)
                .attr('height', container.clientHeight);

            zoom = d3.zoom()
                .scaleExtent([0.05, 4])
                .on('zoom', (event) => root.attr('transform', event.transform));
            svg.call(zoom).on('dblclick.zoom', null);
            svg.on('click', (event) => {
                if (event.target === svg.node()) act({ type: 'pane_click' });
            });

            root = svg.append('g');
            linkLayer = root.append('g');
            nodeLayer = root.append('g');

            document.getElementById('direction').addEventListener('change', (e) =>
                act({ type: 'set_direction', direction: e.target.value }));
            document.getElementById('size-mode').addEventListener('change', (e) =>
                act({ type: 'set_size_mode', size_mode: e.target.value }));
            document.getElementById('level').addEventListener('change', (e) => {
                const slider = e.target;
                const level = Number(slider.value) >= Number(slider.max) ? SHOW_ALL : Number(slider.value);
                act({ type: 'set_level', level });
            });
            document.getElementById('collapse-all').addEventListener('click', () => act({ type: 'collapse_all' }));
            document.getElementById('expand-all').addEventListener('click', () => act({ type: 'expand_all' }));
            document.getElementById('reorganize').addEventListener('click', () =>
                act({ type: 'reorganize', preserve_selected: frame && frame.view.selected !== null }));

            let searchTimer = null;
            document.getElementById('search').addEventListener('input', (e) => {
                clearTimeout(searchTimer);
                searchTimer = setTimeout(() => act({ type: 'search', term: e.target.value }), 150);
            });
        }

        function anchors(edge, byId, direction) {
            const s = byId.get(edge.source);
            const t = byId.get(edge.target);
            if (!s || !t || !s.size || !t.size) return null;
            if (direction === 'lr') {
                const sx = s.position.x + s.size.width, sy = s.position.y + s.size.height / 2;
                const tx = t.position.x, ty = t.position.y + t.size.height / 2;
                const mx = (sx + tx) / 2;
                return `M${sx},${sy} C${mx},${sy} ${mx},${ty} ${tx},${ty}`;
            }
            const sx = s.position.x + s.size.width / 2, sy = s.position.y + s.size.height;
            const tx = t.position.x + t.size.width / 2, ty = t.position.y;
            const my = (sy + ty) / 2;
            return `M${sx},${sy} C${sx},${my} ${tx},${my} ${tx},${ty}`;
        }

        function render(data) {
            frame = data;
            const visible = data.nodes.filter(n => !n.hidden);
            const byId = new Map(visible.map(n => [n.id, n]));

            document.getElementById('stat-depth').textContent = data.stats.max_depth;
            document.getElementById('stat-nodes').textContent = data.stats.node_count;
            document.getElementById('stat-visible').textContent = data.stats.visible_nodes;
            document.getElementById('stat-props').textContent = data.stats.property_count;
            document.getElementById('stat-size').textContent = data.stats.size;
            document.getElementById('stat-matches').textContent = data.view.search_matches;
            document.getElementById('direction').value = data.view.direction;
            document.getElementById('size-mode').value = data.view.size_mode;

            const slider = document.getElementById('level');
            slider.max = data.view.max_level + 1;
            slider.value = Math.min(data.view.level, data.view.max_level + 1);
            document.getElementById('level-value').textContent =
                data.view.level >= SHOW_ALL ? 'all' : data.view.level;

            const edges = data.edges.filter(e => !e.hidden);
            linkLayer.selectAll('path')
                .data(edges, d => d.id)
                .join('path')
                .attr('class', d => d.highlighted ? 'link highlighted' : 'link')
                .attr('d', d => anchors(d, byId, data.view.direction));

            const node = nodeLayer.selectAll('g.node')
                .data(visible, d => d.id)
                .join(enter => {
                    const g = enter.append('g');
                    g.append('rect').attr('class', 'body').attr('rx', 6);
                    g.append('g').attr('class', 'content');
                    const toggle = g.append('g').attr('class', 'toggle');
                    toggle.append('circle').attr('r', 9);
                    toggle.append('text').attr('dy', 4);
                    return g;
                })
                .attr('class', d => ['node', d.kind, d.selected ? 'selected' : '', d.search_match ? 'match' : ''].join(' '))
                .attr('transform', d => `translate(${d.position.x},${d.position.y})`)
                .on('click', (event, d) => {
                    event.stopPropagation();
                    act({ type: 'select', node_id: d.id });
                });

            node.select('rect.body')
                .attr('width', d => d.size ? d.size.width : 180)
                .attr('height', d => d.size ? d.size.height : 40);

            node.select('g.content').each(function(d) {
                const content = d3.select(this);
                content.selectAll('*').remove();
                const title = d.kind === 'array' ? `${d.label} [${d.array_length}]` : d.label;
                content.append('text').attr('class', 'title').attr('x', 10).attr('y', 20).text(title);
                content.append('text').attr('x', 10).attr('y', 36).attr('opacity', 0.6)
                    .text(`depth ${d.depth}`);
                if (d.kind === 'object' && !d.collapsed) {
                    d.properties.forEach((p, i) => {
                        const row = content.append('text').attr('x', 10).attr('y', 58 + i * 22);
                        row.append('tspan').attr('class', 'key').text(`${p.key}: `);
                        row.append('tspan').text(p.value);
                    });
                }
            });

            node.select('g.toggle')
                .style('display', d => d.child_count > 0 ? null : 'none')
                .attr('transform', d => d.size ? `translate(${d.size.width - 14},14)` : 'translate(0,0)')
                .on('click', (event, d) => {
                    event.stopPropagation();
                    act({ type: 'toggle', node_id: d.id });
                });
            node.select('g.toggle text')
                .text(d => d.collapsed ? `+${d.child_count}` : '-');

            if (!STATIC_DATA) {
                let moved = false;
                node.call(d3.drag()
                    .on('start', () => { moved = false; })
                    .on('drag', function(event, d) {
                        if (!moved) {
                            moved = true;
                            post('/api/action', { type: 'drag_start', node_id: d.id, x: d.position.x, y: d.position.y });
                        }
                        d.position.x += event.dx;
                        d.position.y += event.dy;
                        d3.select(this).attr('transform', `translate(${d.position.x},${d.position.y})`);
                        linkLayer.selectAll('path').attr('d', e => anchors(e, byId, data.view.direction));
                    })
                    .on('end', (event, d) => {
                        if (moved) act({ type: 'drag_end', node_id: d.id, x: d.position.x, y: d.position.y });
                    }));
            }

            if (data.fit_view) fitView(visible, data.fit_view);
        }

        function fitView(nodes, options) {
            if (nodes.length === 0) return;
            const minX = d3.min(nodes, n => n.position.x);
            const minY = d3.min(nodes, n => n.position.y);
            const maxX = d3.max(nodes, n => n.position.x + (n.size ? n.size.width : 0));
            const maxY = d3.max(nodes, n => n.position.y + (n.size ? n.size.height : 0));
            const width = +svg.attr('width');
            const height = +svg.attr('height');
            const usable = 1 - options.padding;
            const scale = Math.min(options.max_zoom,
                (width * usable) / Math.max(maxX - minX, 1),
                (height * usable) / Math.max(maxY - minY, 1));
            const transform = d3.zoomIdentity
                .translate(width / 2, height / 2)
                .scale(scale)
                .translate(-(minX + maxX) / 2, -(minY + maxY) / 2);
            svg.transition().duration(options.duration_ms).call(zoom.transform, transform);
        }

        setup();
        if (STATIC_DATA) {
            document.body.classList.add('static');
            render(STATIC_DATA);
        } else {
            refresh();
            const events = new EventSource('/api/events');
            events.addEventListener('changed', (event) => {
                if (!frame || Number(event.data) !== frame.revision) refresh();
            });
        }
    </script>
</body>
</html>
"#;

/// Self-contained page showing one frame, for sharing without a server.
pub fn generate_static_html(data: &GraphData) -> String {
    // `</` inside a script block would end it early
    let json = serde_json::to_string(data)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/");
    INDEX_HTML.replacen(STATIC_DATA_MARKER, &json, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{DeferredCanvas, Session, SessionOptions};
    use serde_json::json;

    #[test]
    fn test_static_html_embeds_frame() {
        let mut session = Session::with_document(
            DeferredCanvas::new(),
            SessionOptions::default(),
            json!({"note": "</script><b>", "child": {}}),
        );
        let fit = session.canvas_mut().take_fit();
        let html = generate_static_html(&GraphData::from_session(&session, fit));

        assert!(!html.contains(STATIC_DATA_MARKER));
        assert!(html.contains("\"revision\""));
        assert!(html.contains("<\\/script><b>"));
        assert_eq!(html.matches("</script>").count(), INDEX_HTML.matches("</script>").count());
    }
}
