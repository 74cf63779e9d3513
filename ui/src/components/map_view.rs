//! Leaflet map widget.
//!
//! Leaflet is loaded from a script tag as the global `L`; the bindings below
//! cover the handful of calls the site needs. Parents that want to move the
//! map (fly to a place, open its popup) hold a [`MapHandle`] and pass it in.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use content::map::{self, MapCommand, MapMarker};
use payloads::{AttractionId, Coordinates};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

mod leaflet {
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlElement;

    #[wasm_bindgen]
    extern "C" {
        pub type Map;
        pub type Marker;
        pub type TileLayer;
        pub type LatLng;
        pub type MouseEvent;

        #[wasm_bindgen(js_namespace = L, js_name = map)]
        pub fn map(element: &HtmlElement) -> Map;
        #[wasm_bindgen(method, js_name = setView)]
        pub fn set_view(this: &Map, center: &JsValue, zoom: u8) -> Map;
        #[wasm_bindgen(method, js_name = flyTo)]
        pub fn fly_to(this: &Map, center: &JsValue, zoom: u8) -> Map;
        #[wasm_bindgen(method, js_name = fitBounds)]
        pub fn fit_bounds(this: &Map, bounds: &JsValue) -> Map;
        #[wasm_bindgen(method)]
        pub fn on(
            this: &Map,
            event: &str,
            handler: &Closure<dyn FnMut(MouseEvent)>,
        ) -> Map;
        #[wasm_bindgen(method)]
        pub fn remove(this: &Map) -> Map;

        #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
        pub fn tile_layer(url: &str, options: &JsValue) -> TileLayer;
        #[wasm_bindgen(method, js_name = addTo)]
        pub fn add_to(this: &TileLayer, map: &Map) -> TileLayer;

        #[wasm_bindgen(js_namespace = L, js_name = marker)]
        pub fn marker(position: &JsValue) -> Marker;
        #[wasm_bindgen(method, js_name = addTo)]
        pub fn add_to(this: &Marker, map: &Map) -> Marker;
        #[wasm_bindgen(method, js_name = bindPopup)]
        pub fn bind_popup(this: &Marker, content: &str) -> Marker;
        #[wasm_bindgen(method, js_name = openPopup)]
        pub fn open_popup(this: &Marker) -> Marker;
        #[wasm_bindgen(method, js_name = setLatLng)]
        pub fn set_lat_lng(this: &Marker, position: &JsValue) -> Marker;
        #[wasm_bindgen(method)]
        pub fn remove(this: &Marker) -> Marker;

        #[wasm_bindgen(method, getter)]
        pub fn latlng(this: &MouseEvent) -> LatLng;
        #[wasm_bindgen(method, getter)]
        pub fn lat(this: &LatLng) -> f64;
        #[wasm_bindgen(method, getter)]
        pub fn lng(this: &LatLng) -> f64;
    }
}

fn lat_lng(position: Coordinates) -> JsValue {
    js_sys::Array::of2(&position.lat.into(), &position.lng.into()).into()
}

fn tile_options() -> JsValue {
    let options = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &options,
        &"attribution".into(),
        &ATTRIBUTION.into(),
    );
    options.into()
}

struct MountedMap {
    map: leaflet::Map,
    markers: HashMap<AttractionId, leaflet::Marker>,
    picked: Option<leaflet::Marker>,
    _on_click: Closure<dyn FnMut(leaflet::MouseEvent)>,
}

impl MountedMap {
    fn set_markers(&mut self, markers: &[MapMarker]) {
        for (_, marker) in self.markers.drain() {
            marker.remove();
        }
        for marker in markers {
            let leaflet_marker = leaflet::marker(&lat_lng(marker.position))
                .add_to(&self.map)
                .bind_popup(&marker.popup_html());
            self.markers.insert(marker.id, leaflet_marker);
        }
        // a single marker keeps the location's own center and zoom
        if let Some(bounds) = map::bounds(markers).filter(|_| markers.len() > 1)
        {
            let corners = js_sys::Array::of2(
                &lat_lng(bounds.south_west),
                &lat_lng(bounds.north_east),
            );
            self.map.fit_bounds(&corners);
        }
    }

    fn set_picked(&mut self, position: Option<Coordinates>) {
        match (position, &self.picked) {
            (Some(position), Some(marker)) => {
                marker.set_lat_lng(&lat_lng(position));
            }
            (Some(position), None) => {
                self.picked = Some(
                    leaflet::marker(&lat_lng(position)).add_to(&self.map),
                );
            }
            (None, _) => {
                if let Some(marker) = self.picked.take() {
                    marker.remove();
                }
            }
        }
    }
}

/// Imperative access to a mounted map. Commands sent before the map mounts
/// are ignored.
#[derive(Clone, Default)]
pub struct MapHandle {
    inner: Rc<RefCell<Option<MountedMap>>>,
}

impl PartialEq for MapHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl MapHandle {
    pub fn run(&self, command: MapCommand) {
        let inner = self.inner.borrow();
        let Some(mounted) = inner.as_ref() else {
            return;
        };
        match command {
            MapCommand::FlyTo { position, zoom } => {
                mounted.map.fly_to(&lat_lng(position), zoom);
            }
            MapCommand::OpenPopup(id) => {
                if let Some(marker) = mounted.markers.get(&id) {
                    marker.open_popup();
                }
            }
        }
    }

    pub fn focus(&self, marker: &MapMarker) {
        for command in MapCommand::focus(marker) {
            self.run(command);
        }
    }
}

#[hook]
pub fn use_map_handle() -> MapHandle {
    (*use_state(MapHandle::default)).clone()
}

#[derive(Properties, PartialEq)]
pub struct MapViewProps {
    pub center: Coordinates,
    pub zoom: u8,
    #[prop_or_default]
    pub markers: Vec<MapMarker>,
    /// Owned by the parent so the Leaflet instance outlives re-renders.
    pub handle: MapHandle,
    /// Enables click-to-place: clicks are reported as rounded coordinates.
    #[prop_or_default]
    pub on_pick: Option<Callback<Coordinates>>,
    /// Position of the placed marker when picking.
    #[prop_or_default]
    pub picked: Option<Coordinates>,
    #[prop_or_else(|| AttrValue::from("h-96"))]
    pub height: AttrValue,
}

#[function_component]
pub fn MapView(props: &MapViewProps) -> Html {
    let node_ref = use_node_ref();
    let on_pick = use_mut_ref(|| None::<Callback<Coordinates>>);
    *on_pick.borrow_mut() = props.on_pick.clone();

    {
        let node_ref = node_ref.clone();
        let handle = props.handle.clone();
        let (center, zoom) = (props.center, props.zoom);
        use_effect_with((), move |_| {
            if let Some(element) = node_ref.cast::<HtmlElement>() {
                let leaflet_map = leaflet::map(&element);
                leaflet_map.set_view(&lat_lng(center), zoom);
                leaflet::tile_layer(TILE_URL, &tile_options())
                    .add_to(&leaflet_map);

                let on_click = Closure::<dyn FnMut(leaflet::MouseEvent)>::new(
                    move |event: leaflet::MouseEvent| {
                        let point = event.latlng();
                        if let Some(callback) = &*on_pick.borrow() {
                            callback.emit(map::pick_position(
                                point.lat(),
                                point.lng(),
                            ));
                        }
                    },
                );
                leaflet_map.on("click", &on_click);

                *handle.inner.borrow_mut() = Some(MountedMap {
                    map: leaflet_map,
                    markers: HashMap::new(),
                    picked: None,
                    _on_click: on_click,
                });
            }
            move || {
                if let Some(mounted) = handle.inner.borrow_mut().take() {
                    mounted.map.remove();
                }
            }
        });
    }

    {
        let handle = props.handle.clone();
        use_effect_with(props.markers.clone(), move |markers| {
            if let Some(mounted) = handle.inner.borrow_mut().as_mut() {
                mounted.set_markers(markers);
            }
        });
    }

    {
        let handle = props.handle.clone();
        use_effect_with((props.center, props.zoom), move |(center, zoom)| {
            if let Some(mounted) = handle.inner.borrow().as_ref() {
                mounted.map.set_view(&lat_lng(*center), *zoom);
            }
        });
    }

    {
        let handle = props.handle.clone();
        use_effect_with(props.picked, move |picked| {
            if let Some(mounted) = handle.inner.borrow_mut().as_mut() {
                mounted.set_picked(*picked);
            }
        });
    }

    html! {
        <div
            ref={node_ref}
            class={classes!("w-full", "rounded-lg", "z-0",
                            props.height.to_string())}
        />
    }
}
