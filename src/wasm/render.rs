//! WebGL2 renderer for [`Scene`] and the frame loop driving it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Mat3;
use js_sys::{Float32Array, Object, Reflect, Uint16Array};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram,
    WebGlShader, WebGlUniformLocation, WebGlVertexArrayObject, Window,
};

use super::dom;
use crate::config::SiteConfig;
use crate::error::{Result, SiteError};
use crate::geometry::MeshData;
use crate::scene::{Scene, Stage};

const VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;

uniform mat4 u_model;
uniform mat4 u_view_proj;
uniform mat3 u_normal_matrix;

out vec3 v_world;
out vec3 v_normal;

void main() {
    vec4 world = u_model * vec4(a_position, 1.0);
    v_world = world.xyz;
    v_normal = u_normal_matrix * a_normal;
    gl_Position = u_view_proj * world;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_world;
in vec3 v_normal;

uniform vec3 u_color;
uniform float u_opacity;
uniform bool u_lit;
uniform float u_shininess;
uniform float u_specular;
uniform vec3 u_camera;
uniform vec3 u_ambient;
uniform vec3 u_light_pos[2];
uniform vec3 u_light_color[2];

out vec4 frag;

void main() {
    if (!u_lit) {
        frag = vec4(u_color, u_opacity);
        return;
    }
    vec3 n = normalize(v_normal);
    vec3 to_eye = normalize(u_camera - v_world);
    vec3 diffuse = u_ambient;
    vec3 specular = vec3(0.0);
    for (int i = 0; i < 2; i++) {
        vec3 l = normalize(u_light_pos[i] - v_world);
        diffuse += u_light_color[i] * max(dot(n, l), 0.0);
        vec3 h = normalize(l + to_eye);
        specular += u_light_color[i] * pow(max(dot(n, h), 0.0), u_shininess) * u_specular;
    }
    frag = vec4(u_color * diffuse + specular, u_opacity);
}
"#;

struct GpuMesh {
    vao: WebGlVertexArrayObject,
    buffers: [WebGlBuffer; 3],
    index_count: i32,
}

struct Uniforms {
    model: Option<WebGlUniformLocation>,
    view_proj: Option<WebGlUniformLocation>,
    normal_matrix: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
    lit: Option<WebGlUniformLocation>,
    shininess: Option<WebGlUniformLocation>,
    specular: Option<WebGlUniformLocation>,
    camera: Option<WebGlUniformLocation>,
    ambient: Option<WebGlUniformLocation>,
    light_pos: Option<WebGlUniformLocation>,
    light_color: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &GL, program: &WebGlProgram) -> Self {
        let at = |name: &str| gl.get_uniform_location(program, name);
        Self {
            model: at("u_model"),
            view_proj: at("u_view_proj"),
            normal_matrix: at("u_normal_matrix"),
            color: at("u_color"),
            opacity: at("u_opacity"),
            lit: at("u_lit"),
            shininess: at("u_shininess"),
            specular: at("u_specular"),
            camera: at("u_camera"),
            ambient: at("u_ambient"),
            light_pos: at("u_light_pos"),
            light_color: at("u_light_color"),
        }
    }
}

pub struct Renderer {
    gl: GL,
    program: WebGlProgram,
    uniforms: Uniforms,
    meshes: Vec<GpuMesh>,
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement, scene: &Scene) -> Result<Self> {
        // Transparent, antialiased surface so the page background shows through.
        let options = Object::new();
        Reflect::set(&options, &"alpha".into(), &JsValue::TRUE)?;
        Reflect::set(&options, &"antialias".into(), &JsValue::TRUE)?;
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &options)?
            .ok_or_else(|| SiteError::WebGl("context unavailable".to_owned()))?
            .unchecked_into();

        let program = link_program(&gl)?;
        let uniforms = Uniforms::locate(&gl, &program);
        let meshes = scene
            .meshes()
            .iter()
            .map(|mesh| upload(&gl, &mesh.geometry))
            .collect::<Result<Vec<_>>>()?;

        gl.enable(GL::DEPTH_TEST);
        gl.enable(GL::CULL_FACE);
        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);

        let renderer = Self {
            gl,
            program,
            uniforms,
            meshes,
        };
        let (width, height) = scene.viewport();
        renderer.resize(width, height);
        Ok(renderer)
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    pub fn render(&self, scene: &Scene) {
        let gl = &self.gl;
        let u = &self.uniforms;
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        gl.use_program(Some(&self.program));

        let camera = &scene.camera;
        gl.uniform_matrix4fv_with_f32_array(
            u.view_proj.as_ref(),
            false,
            &camera.view_projection().to_cols_array(),
        );
        gl.uniform3fv_with_f32_array(u.camera.as_ref(), &camera.position.to_array());
        let ambient = scene.ambient.color * scene.ambient.intensity;
        gl.uniform3fv_with_f32_array(u.ambient.as_ref(), &ambient.to_array());

        let mut positions = [0.0f32; 6];
        let mut colors = [0.0f32; 6];
        for (i, light) in scene.point_lights.iter().enumerate() {
            positions[i * 3..i * 3 + 3].copy_from_slice(&light.position.to_array());
            colors[i * 3..i * 3 + 3].copy_from_slice(&(light.color * light.intensity).to_array());
        }
        gl.uniform3fv_with_f32_array(u.light_pos.as_ref(), &positions);
        gl.uniform3fv_with_f32_array(u.light_color.as_ref(), &colors);

        for (mesh, gpu) in scene.meshes().iter().zip(&self.meshes) {
            let model = mesh.transform.matrix();
            let normal = Mat3::from_mat4(model).inverse().transpose();
            let material = &mesh.material;

            gl.uniform_matrix4fv_with_f32_array(u.model.as_ref(), false, &model.to_cols_array());
            gl.uniform_matrix3fv_with_f32_array(
                u.normal_matrix.as_ref(),
                false,
                &normal.to_cols_array(),
            );
            gl.uniform3fv_with_f32_array(u.color.as_ref(), &material.color.to_array());
            gl.uniform1f(u.opacity.as_ref(), material.opacity);
            gl.uniform1i(u.lit.as_ref(), i32::from(material.lit));
            gl.uniform1f(u.shininess.as_ref(), material.shininess());
            gl.uniform1f(u.specular.as_ref(), material.specular_strength());

            gl.bind_vertex_array(Some(&gpu.vao));
            gl.draw_elements_with_i32(GL::TRIANGLES, gpu.index_count, GL::UNSIGNED_SHORT, 0);
        }
        gl.bind_vertex_array(None);
    }

    /// Releases every GL object. The renderer must not be used afterwards.
    pub fn dispose(&mut self) {
        let gl = &self.gl;
        for mesh in self.meshes.drain(..) {
            gl.delete_vertex_array(Some(&mesh.vao));
            for buffer in &mesh.buffers {
                gl.delete_buffer(Some(buffer));
            }
        }
        gl.delete_program(Some(&self.program));
    }
}

fn compile_shader(gl: &GL, kind: u32, stage: &'static str, source: &str) -> Result<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| SiteError::WebGl("create shader".to_owned()))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if !gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        return Err(SiteError::Shader { stage, log });
    }
    Ok(shader)
}

fn link_program(gl: &GL) -> Result<WebGlProgram> {
    let vs = compile_shader(gl, GL::VERTEX_SHADER, "vertex", VERTEX_SHADER)?;
    let fs = compile_shader(gl, GL::FRAGMENT_SHADER, "fragment", FRAGMENT_SHADER)?;
    let program = gl
        .create_program()
        .ok_or_else(|| SiteError::WebGl("create program".to_owned()))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);
    // Shaders are no longer needed once linked.
    gl.delete_shader(Some(&vs));
    gl.delete_shader(Some(&fs));

    if !gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        return Err(SiteError::Shader { stage: "link", log });
    }
    Ok(program)
}

fn create_buffer(gl: &GL) -> Result<WebGlBuffer> {
    gl.create_buffer()
        .ok_or_else(|| SiteError::WebGl("create buffer".to_owned()))
}

fn upload(gl: &GL, mesh: &MeshData) -> Result<GpuMesh> {
    let vao = gl
        .create_vertex_array()
        .ok_or_else(|| SiteError::WebGl("create vertex array".to_owned()))?;
    gl.bind_vertex_array(Some(&vao));

    let positions = create_buffer(gl)?;
    let normals = create_buffer(gl)?;
    let indices = create_buffer(gl)?;

    for (location, buffer, data) in [(0, &positions, &mesh.positions), (1, &normals, &mesh.normals)] {
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
        let array = Float32Array::from(&data[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, GL::STATIC_DRAW);
        gl.enable_vertex_attrib_array(location);
        gl.vertex_attrib_pointer_with_i32(location, 3, GL::FLOAT, false, 0, 0);
    }

    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&indices));
    let array = Uint16Array::from(&mesh.indices[..]);
    gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &array, GL::STATIC_DRAW);
    gl.bind_vertex_array(None);

    Ok(GpuMesh {
        vao,
        buffers: [positions, normals, indices],
        index_count: mesh.index_count() as i32,
    })
}

fn layout_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
    (
        canvas.client_width().max(0) as u32,
        canvas.client_height().max(0) as u32,
    )
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Owns the running scene. [`SceneHandle::teardown`] stops the frame loop and
/// frees the GL resources.
pub struct SceneHandle {
    window: Window,
    stage: Rc<RefCell<Stage>>,
    renderer: Rc<RefCell<Renderer>>,
    frame_id: Rc<Cell<Option<i32>>>,
    frame: FrameCallback,
}

impl SceneHandle {
    pub fn is_running(&self) -> bool {
        self.stage.borrow().is_running()
    }

    pub fn frames(&self) -> u64 {
        self.stage.borrow().frames()
    }

    pub fn teardown(&self) {
        if !self.stage.borrow_mut().teardown() {
            return;
        }
        if let Some(id) = self.frame_id.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {err:?}");
            }
        }
        self.renderer.borrow_mut().dispose();
        // Dropping the callback breaks its self-reference.
        self.frame.borrow_mut().take();
        log::info!("3D scene torn down");
    }
}

/// Builds the scene on the configured canvas and starts the render loop.
/// Returns `Ok(None)` when the page has no canvas.
pub fn start(window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<SceneHandle>> {
    let Some(element) = document.get_element_by_id(config.selectors.canvas_id) else {
        return Ok(None);
    };
    let canvas: HtmlCanvasElement = element
        .dyn_into()
        .map_err(|_| SiteError::WebGl(format!("#{} is not a canvas", config.selectors.canvas_id)))?;

    let (width, height) = layout_size(&canvas);
    canvas.set_width(width);
    canvas.set_height(height);

    let scene = Scene::new(width, height);
    let renderer = Rc::new(RefCell::new(Renderer::new(&canvas, &scene)?));
    let stage = Rc::new(RefCell::new(Stage::new(scene)));
    let frame_id = Rc::new(Cell::new(None));

    // Resize the drawing buffer to the canvas' layout box.
    {
        let canvas = canvas.clone();
        let stage = Rc::clone(&stage);
        let renderer = Rc::clone(&renderer);
        dom::listen(window, "resize", move |_| {
            let (w, h) = layout_size(&canvas);
            if stage.borrow_mut().resize(w, h) {
                canvas.set_width(w);
                canvas.set_height(h);
                renderer.borrow().resize(w, h);
            }
        })?;
    }

    // Frame loop. The closure re-requests itself through `f`, records the
    // pending request id for `teardown`, and stops once the stage is torn down.
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = Rc::clone(&f);
    {
        let window = window.clone();
        let stage = Rc::clone(&stage);
        let renderer = Rc::clone(&renderer);
        let frame_id = Rc::clone(&frame_id);
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            frame_id.set(None);
            let time = js_sys::Date::now() * 0.001;
            if !stage.borrow_mut().tick(time) {
                return;
            }
            renderer.borrow().render(stage.borrow().scene());

            // schedule next
            let next = f.borrow();
            let Some(callback) = next.as_ref() else {
                return;
            };
            match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                Ok(id) => frame_id.set(Some(id)),
                Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
            }
        }) as Box<dyn FnMut()>));
    }

    if let Some(callback) = g.borrow().as_ref() {
        frame_id.set(Some(window.request_animation_frame(callback.as_ref().unchecked_ref())?));
    }
    log::info!("3D scene started at {width}x{height}");

    Ok(Some(SceneHandle {
        window: window.clone(),
        stage,
        renderer,
        frame_id,
        frame: g,
    }))
}

/// Tears the scene down when the page is about to go away.
pub fn teardown_on_unload(window: &Window, handle: SceneHandle) -> Result<()> {
    dom::listen(window, "beforeunload", move |_| handle.teardown())
}
