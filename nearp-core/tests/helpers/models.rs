use crate::models::*;
use crate::utils::Float;

/// Builds valid instances for tests. By default: one vehicle, capacity 100, depot 1 and no links.
pub struct InstanceBuilder(Instance);

impl Default for InstanceBuilder {
    fn default() -> Self {
        Self(Instance {
            name: "test".to_string(),
            fleet: FleetSize::Fixed(1),
            capacity: 100,
            depot: 1,
            nodes: vec![],
            edges: vec![],
            arcs: vec![],
            turns: vec![],
        })
    }
}

impl InstanceBuilder {
    /// Adds optional nodes 1..=count.
    pub fn nodes(&mut self, count: usize) -> &mut Self {
        self.0.nodes = (1..=count).map(Node::optional).collect();
        self
    }

    pub fn required_node(&mut self, id: NodeId, service_cost: Cost) -> &mut Self {
        self.0.nodes[id - 1] = Node::required(id, service_cost);
        self
    }

    pub fn edge(&mut self, edge: Link) -> &mut Self {
        self.0.edges.push(edge);
        self
    }

    pub fn arc(&mut self, arc: Link) -> &mut Self {
        self.0.arcs.push(arc);
        self
    }

    pub fn turn(&mut self, from: NodeId, via: NodeId, to: NodeId, cost: Cost) -> &mut Self {
        let kind = if from == to { TurnKind::UTurn } else { TurnKind::Straight };
        self.0.turns.push(Turn { from, via, to, cost, kind });
        self
    }

    pub fn fleet(&mut self, fleet: FleetSize) -> &mut Self {
        self.0.fleet = fleet;
        self
    }

    pub fn capacity(&mut self, capacity: Cost) -> &mut Self {
        self.0.capacity = capacity;
        self
    }

    pub fn depot(&mut self, depot: NodeId) -> &mut Self {
        self.0.depot = depot;
        self
    }

    pub fn build(&mut self) -> Instance {
        self.0.clone().validate().expect("cannot build valid test instance")
    }
}

/// Two nodes, a required arc (1,2) with service 5 and a free way back.
pub fn create_single_arc_instance() -> Instance {
    InstanceBuilder::default()
        .nodes(2)
        .arc(Link::required(1, 2, 1, 5))
        .arc(Link::optional(2, 1, 0))
        .capacity(10)
        .build()
}

/// A triangle 1-2-3 of optional edges with a required edge (2,3) and a required node 3.
pub fn create_triangle_instance() -> Instance {
    InstanceBuilder::default()
        .nodes(3)
        .required_node(3, 4)
        .edge(Link::optional(1, 2, 2))
        .edge(Link::required(2, 3, 3, 1))
        .edge(Link::optional(3, 1, 2))
        .fleet(FleetSize::Fixed(2))
        .build()
}

pub fn create_test_graph(instance: &Instance) -> FormulationGraph {
    crate::construction::preprocess(instance)
}

/// Creates an assignment of one vehicle from its solved values.
pub fn create_assignment(
    vehicle: usize,
    arc_services: Vec<Float>,
    node_services: Vec<Float>,
    deadheads: Vec<Float>,
    flows: Vec<Float>,
    cost: Float,
) -> VehicleAssignment {
    VehicleAssignment { vehicle, arc_services, node_services, deadheads, flows, turns: vec![], cost }
}

/// A solved assignment of the single arc instance: service (1,2), deadhead (2,1).
pub fn create_single_arc_assignment() -> VehicleAssignment {
    create_assignment(0, vec![1.], vec![], vec![0., 1.], vec![5., 0.], 5.)
}
