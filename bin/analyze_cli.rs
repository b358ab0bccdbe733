//! Minimal end-to-end demonstration: a toy in-memory object store run
//! through [`ctrlgraph::analyze`], printing the resulting working graph.
//!
//! Not a real directory-service adapter — just enough of one to exercise
//! the engine from the command line, the way the teacher crate ships a
//! `examples/`-style walk-through binary alongside the library.

use hashbrown::HashMap;

use ctrlgraph::{
    analyze, AnalysisOptions, Direction, EdgeBitmap, EdgeRegistry, NodeFilter, ObjectAdapter,
    ObjectStore, Sid,
};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
struct Principal {
    id: u32,
    kind: Kind,
    rid: i64,
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
enum Kind {
    User,
    Group,
    Computer,
}

impl ObjectAdapter for Principal {
    type TypeTag = Kind;

    fn object_type(&self) -> Kind {
        self.kind
    }

    fn sid(&self) -> Option<Sid> {
        Some(Sid::new(&[1, 5, 21, 1, 2, 3, self.rid as u32]))
    }

    fn attr_int(&self, key: &str) -> Option<i64> {
        match key {
            "rid" => Some(self.rid),
            _ => None,
        }
    }
}

struct ToyStore {
    principals: Vec<Principal>,
    adjacency: HashMap<u32, Vec<(u32, EdgeBitmap)>>,
    reverse: HashMap<u32, Vec<(u32, EdgeBitmap)>>,
}

impl ObjectStore<Principal> for ToyStore {
    fn objects(&self) -> Box<dyn Iterator<Item = Principal> + '_> {
        Box::new(self.principals.iter().cloned())
    }

    fn edges(&self, o: &Principal, dir: Direction) -> Box<dyn Iterator<Item = (Principal, EdgeBitmap)> + '_> {
        let table = match dir {
            Direction::Out => &self.adjacency,
            Direction::In => &self.reverse,
        };
        let by_id = |id: u32| self.principals.iter().find(|p| p.id == id).unwrap().clone();
        match table.get(&o.id) {
            Some(edges) => Box::new(edges.iter().map(move |&(id, bm)| (by_id(id), bm))),
            None => Box::new(std::iter::empty()),
        }
    }
}

fn main() {
    env_logger::init();

    let domain_admins = Principal { id: 1, kind: Kind::Group, rid: 512 };
    let alice = Principal { id: 2, kind: Kind::User, rid: 1001 };
    let workstation = Principal { id: 3, kind: Kind::Computer, rid: 1100 };

    let mut registry: EdgeRegistry<Principal> = EdgeRegistry::new();
    let member_of = registry.register("MemberOf", |_src, _dst| 100).unwrap();
    registry.mark_member_of_group(member_of);
    let admin_to = registry.register("AdminTo", |_src, _dst| 80).unwrap();

    let mut adjacency = HashMap::new();
    adjacency.insert(alice.id, vec![(domain_admins.id, EdgeBitmap::single(member_of))]);
    adjacency.insert(domain_admins.id, vec![(workstation.id, EdgeBitmap::single(admin_to))]);

    let mut reverse = HashMap::new();
    reverse.insert(domain_admins.id, vec![(alice.id, EdgeBitmap::single(member_of))]);
    reverse.insert(workstation.id, vec![(domain_admins.id, EdgeBitmap::single(admin_to))]);

    let store = ToyStore {
        principals: vec![domain_admins, alice, workstation],
        adjacency,
        reverse,
    };

    struct IsWorkstation;
    impl NodeFilter<Principal> for IsWorkstation {
        fn evaluate(&self, o: &Principal) -> bool {
            o.kind == Kind::Computer
        }
    }

    let options = AnalysisOptions::<Principal>::new()
        .with_direction(Direction::In)
        .with_filter_first(Box::new(IsWorkstation))
        .with_max_depth(-1);

    let results = analyze(&store, &registry, &options);
    println!("{}", results.graph);
    println!("removed during pruning: {}", results.removed);
}
