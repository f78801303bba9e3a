pub const HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Golden Egg</title>
  <style>
    body {
      margin: 0;
      padding: 0;
      overflow: hidden;
      background-color: #2a2a2a;
      font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    }
    #canvas-container {
      width: 100vw;
      height: 100vh;
    }
    .hidden {
      display: none !important;
    }
    #gate {
      position: absolute;
      inset: 0;
      display: flex;
      align-items: center;
      justify-content: center;
      background-color: #1e1e1e;
    }
    #gate form {
      background-color: rgba(0, 0, 0, 0.8);
      color: #ffffff;
      padding: 24px;
      border-radius: 8px;
      display: flex;
      flex-direction: column;
      gap: 10px;
      min-width: 240px;
    }
    #gate input, #gate button, #popup button {
      font-size: 14px;
      padding: 6px 10px;
      border-radius: 4px;
      border: 1px solid #555;
    }
    #status {
      position: absolute;
      top: 50%;
      left: 50%;
      transform: translate(-50%, -50%);
      color: #aaa;
      font-size: 14px;
    }
    #status.failed {
      color: #ff6666;
      background-color: rgba(0, 0, 0, 0.8);
      padding: 15px;
      border-radius: 8px;
    }
    #popup {
      position: absolute;
      bottom: 20px;
      left: 20px;
      background-color: rgba(0, 0, 0, 0.8);
      color: #ffffff;
      padding: 15px;
      border-radius: 8px;
      max-width: 320px;
      font-size: 14px;
    }
    #popup h2 {
      margin: 0 0 8px 0;
      font-size: 16px;
      color: #ffd76a;
    }
  </style>
</head>
<body>
  <div id="canvas-container"></div>

  <div id="status" class="hidden"></div>

  <div id="popup" class="hidden">
    <h2 id="popup-title"></h2>
    <p id="popup-text"></p>
    <button id="popup-close">Close</button>
  </div>

  <div id="gate">
    <form id="gate-form">
      <label for="gate-password">Password</label>
      <input id="gate-password" type="password" autocomplete="off" autofocus>
      <button type="submit">Enter</button>
    </form>
  </div>

  <script type="importmap">
  {
    "imports": {
      "three": "https://cdn.jsdelivr.net/npm/three@0.160.0/build/three.module.js",
      "three/addons/": "https://cdn.jsdelivr.net/npm/three@0.160.0/examples/jsm/"
    }
  }
  </script>

  <script type="module">
    import * as THREE from 'three';
    import { GLTFLoader } from 'three/addons/loaders/GLTFLoader.js';

    // Scene setup
    const scene = new THREE.Scene();
    scene.background = new THREE.Color(0x2a2a2a);

    const camera = new THREE.PerspectiveCamera(
      75,
      window.innerWidth / window.innerHeight,
      0.1,
      1000
    );
    camera.position.set(0, 0, 5);

    const renderer = new THREE.WebGLRenderer({ antialias: true });
    renderer.setSize(window.innerWidth, window.innerHeight);
    renderer.setPixelRatio(window.devicePixelRatio);
    document.getElementById('canvas-container').appendChild(renderer.domElement);

    // Lighting
    scene.add(new THREE.AmbientLight(0xffffff, 1.0));
    const directionalLight = new THREE.DirectionalLight(0xffffff, 1.0);
    directionalLight.position.set(2, 0, 2);
    scene.add(directionalLight);

    // The whole model hangs off this group; the server drives its rotation
    const assembly = new THREE.Group();
    scene.add(assembly);

    const gltfLoader = new GLTFLoader();
    const raycaster = new THREE.Raycaster();
    const mouse = new THREE.Vector2();

    let ws = null;
    let unlocked = false;
    let password = null;
    let loadedVersion = null;
    let loadingVersion = null;
    let modelReady = false;
    let hoveredNode = null;
    const nodeObjects = new Map(); // glTF node index -> Object3D
    const surfaceColors = new Map(); // "node:surface" -> [r, g, b, a]
    let inertNodes = new Set(); // root parts that never pick

    const statusEl = document.getElementById('status');
    const popupEl = document.getElementById('popup');

    function send(msg) {
      if (ws && ws.readyState === WebSocket.OPEN) {
        ws.send(JSON.stringify(msg));
      }
    }

    function showStatus(text, failed) {
      statusEl.textContent = text;
      statusEl.classList.toggle('failed', !!failed);
      statusEl.classList.remove('hidden');
    }

    function hideStatus() {
      statusEl.classList.add('hidden');
    }

    // Meshes that render a node's own primitives (not its child nodes)
    function surfacesOf(object, associations) {
      if (object.isMesh) return [object];
      return object.children.filter((child) => {
        const info = associations.get(child);
        return child.isMesh && (!info || info.nodes === undefined);
      });
    }

    function applyColor(node, surface, color) {
      const object = nodeObjects.get(node);
      if (!object || !object.userData.surfaces) return;
      const mesh = object.userData.surfaces[surface];
      if (!mesh) return;
      mesh.material.color.setRGB(color[0], color[1], color[2], THREE.LinearSRGBColorSpace);
    }

    function applyColors(colors) {
      for (const { node, surface, color } of colors) {
        surfaceColors.set(`${node}:${surface}`, color);
        applyColor(node, surface, color);
      }
    }

    function clearModel() {
      assembly.traverse((child) => {
        if (child.isMesh) {
          if (child.geometry) child.geometry.dispose();
          if (child.material) child.material.dispose();
        }
      });
      assembly.clear();
      nodeObjects.clear();
      hoveredNode = null;
      modelReady = false;
    }

    function loadModel(version) {
      if (loadingVersion === version) return;
      loadingVersion = version;
      showStatus('Loading model...');
      console.log(`Starting load: model version ${version}`);

      gltfLoader.load(
        `/asset?v=${version}`,
        (gltf) => {
          if (loadingVersion !== version) return; // superseded by a newer reload
          clearModel();

          const associations = gltf.parser.associations;
          gltf.scene.traverse((object) => {
            const info = associations.get(object);
            if (!info || info.nodes === undefined) return;
            const surfaces = surfacesOf(object, associations);
            // Own the materials so recolouring one part never touches another
            surfaces.forEach((mesh) => { mesh.material = mesh.material.clone(); });
            object.userData.surfaces = surfaces;
            nodeObjects.set(info.nodes, object);
          });

          assembly.add(gltf.scene);
          surfaceColors.forEach((color, key) => {
            const [node, surface] = key.split(':').map(Number);
            applyColor(node, surface, color);
          });

          loadedVersion = version;
          loadingVersion = null;
          modelReady = true;
          hideStatus();
          console.log(`Loaded model version ${version}: ${nodeObjects.size} node(s)`);
        },
        undefined,
        (error) => {
          console.error('Error loading model:', error);
          loadingVersion = null;
          showStatus(`Failed to load model: ${error.message || error}`, true);
        }
      );
    }

    function pickNode(event) {
      if (!modelReady) return null;
      const rect = renderer.domElement.getBoundingClientRect();
      mouse.x = ((event.clientX - rect.left) / rect.width) * 2 - 1;
      mouse.y = -((event.clientY - rect.top) / rect.height) * 2 + 1;
      raycaster.setFromCamera(mouse, camera);

      // Nearest hit whose chain of nodes holds no inert part
      const intersects = raycaster.intersectObject(assembly, true);
      for (const hit of intersects) {
        if (!hit.object.isMesh) continue;
        const chain = nodeChain(hit.object);
        if (chain.length === 0 || chain.some((index) => inertNodes.has(index))) continue;
        return chain[0];
      }
      return null;
    }

    // glTF node indices from the object up to the scene, innermost first
    function nodeChain(object) {
      const chain = [];
      while (object) {
        for (const [index, nodeObject] of nodeObjects) {
          if (nodeObject === object) {
            chain.push(index);
            break;
          }
        }
        object = object.parent;
      }
      return chain;
    }

    function handleMessage(msg) {
      switch (msg.type) {
        case 'unlocked':
          unlocked = true;
          document.getElementById('gate').classList.add('hidden');
          break;
        case 'access_denied':
          password = null;
          alert(msg.message);
          break;
        case 'asset_loading':
          showStatus('Loading model...');
          break;
        case 'asset_ready':
          assembly.scale.setScalar(msg.transform.scale);
          assembly.position.fromArray(msg.transform.position);
          assembly.rotation.y = msg.transform.rotation_y;
          camera.rotation.set(msg.camera.pitch, msg.camera.yaw, 0);
          inertNodes = new Set(msg.inert);
          surfaceColors.clear();
          applyColors(msg.colors);
          if (msg.version !== loadedVersion || !modelReady) {
            loadModel(msg.version);
          }
          break;
        case 'asset_failed':
          clearModel();
          loadedVersion = null;
          showStatus(`Model unavailable: ${msg.message}`, true);
          break;
        case 'rotation':
          assembly.rotation.y = msg.y;
          break;
        case 'camera':
          camera.rotation.set(msg.pitch, msg.yaw, 0);
          break;
        case 'colors':
          applyColors(msg.colors);
          break;
        case 'popup':
          document.getElementById('popup-title').textContent = msg.title;
          document.getElementById('popup-text').textContent = msg.text;
          popupEl.classList.remove('hidden');
          break;
        case 'popup_closed':
          popupEl.classList.add('hidden');
          break;
      }
    }

    document.getElementById('gate-form').addEventListener('submit', (event) => {
      event.preventDefault();
      password = document.getElementById('gate-password').value;
      send({ type: 'unlock', password });
    });

    document.getElementById('popup-close').addEventListener('click', () => {
      send({ type: 'dismiss' });
    });

    // Orbit: listen on the window so drags leaving the canvas keep tracking
    window.addEventListener('mousedown', (event) => {
      if (unlocked) send({ type: 'pointer_down', x: event.clientX, y: event.clientY });
    });
    window.addEventListener('mousemove', (event) => {
      if (unlocked) send({ type: 'pointer_move', x: event.clientX, y: event.clientY });
    });
    window.addEventListener('mouseup', () => {
      if (unlocked) send({ type: 'pointer_up' });
    });

    // Hover
    renderer.domElement.addEventListener('pointermove', (event) => {
      if (!unlocked) return;
      const node = pickNode(event);
      if (node === hoveredNode) return;
      if (hoveredNode !== null) send({ type: 'pointer_out', node: hoveredNode });
      if (node !== null) send({ type: 'pointer_over', node });
      hoveredNode = node;
    });
    renderer.domElement.addEventListener('pointerleave', () => {
      if (hoveredNode !== null) send({ type: 'pointer_out', node: hoveredNode });
      hoveredNode = null;
    });

    // Track mouse down position to distinguish clicks from drags
    let mouseDownPos = { x: 0, y: 0 };
    renderer.domElement.addEventListener('mousedown', (event) => {
      mouseDownPos.x = event.clientX;
      mouseDownPos.y = event.clientY;
    });

    renderer.domElement.addEventListener('click', (event) => {
      if (!unlocked) return;
      const dragDistance = Math.hypot(event.clientX - mouseDownPos.x, event.clientY - mouseDownPos.y);
      if (dragDistance > 5) {
        return; // This was a drag, not a click
      }
      const node = pickNode(event);
      if (node !== null) send({ type: 'click', node });
    });

    function connectWebSocket() {
      const protocol = window.location.protocol === 'https:' ? 'wss:' : 'ws:';
      ws = new WebSocket(`${protocol}//${window.location.host}/ws`);

      ws.onopen = () => {
        console.log('WebSocket connected');
        // A fresh session starts locked; replay the accepted password
        if (unlocked && password !== null) {
          send({ type: 'unlock', password });
        }
      };

      ws.onmessage = (event) => {
        handleMessage(JSON.parse(event.data));
      };

      ws.onerror = (error) => {
        console.error('WebSocket error:', error);
      };

      ws.onclose = () => {
        loadedVersion = null;
        console.log('WebSocket disconnected - reconnecting in 2s...');
        setTimeout(connectWebSocket, 2000);
      };
    }

    connectWebSocket();

    window.addEventListener('resize', () => {
      camera.aspect = window.innerWidth / window.innerHeight;
      camera.updateProjectionMatrix();
      renderer.setSize(window.innerWidth, window.innerHeight);
    });

    // Animation loop: one tick per rendered frame
    function animate() {
      requestAnimationFrame(animate);
      if (unlocked && modelReady) send({ type: 'tick' });
      renderer.render(scene, camera);
    }

    animate();

    console.log('Golden Egg viewer initialized');
  </script>
</body>
</html>"#;
