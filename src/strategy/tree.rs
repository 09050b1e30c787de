//! Game tree and minimax evaluation.
//!
//! Nodes live in an arena owned by the [`StateTree`]; each node keeps the
//! indices of its children in generation order. Children are attached once
//! and never removed, so the arena only grows.
//!
//! Whose turn it is at a node is never stored. It follows from the ply
//! (the number of marks on the board): even plies belong to the first
//! mover, odd plies to the second.

use super::error::{InvalidState, SetupError};
use super::utility::Utility;
use crate::games::tictactoe::{Player, Sequence};
use crate::search_config::{MAX_DEPTH, SearchConfig};
use derive_more::Display;
use tracing::{debug, info, instrument};

/// Index of a node inside its [`StateTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("#{}", _0)]
pub struct NodeId(usize);

/// One reachable position.
#[derive(Debug, Clone)]
pub struct Node {
    sequence: Sequence,
    children: Vec<NodeId>,
    utility: Option<Utility>,
}

impl Node {
    fn new(sequence: Sequence) -> Self {
        Self {
            sequence,
            children: Vec::new(),
            utility: None,
        }
    }

    /// The position this node stands for.
    pub fn sequence(&self) -> Sequence {
        self.sequence
    }

    /// Children in generation order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Utility from the last search that reached this node.
    pub fn utility(&self) -> Option<Utility> {
        self.utility
    }
}

/// Tic-tac-toe game tree searched with minimax on behalf of MAX.
///
/// MAX is the computer player trying to complete a line of its goal mark;
/// MIN is the opponent, assumed to play perfectly.
#[derive(Debug, Clone)]
pub struct StateTree {
    config: SearchConfig,
    nodes: Vec<Node>,
    root: NodeId,
    current: NodeId,
}

impl StateTree {
    /// Creates a tree rooted at the empty board.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Config`] if the config fails validation.
    #[instrument]
    pub fn new(config: SearchConfig) -> Result<Self, SetupError> {
        Self::from_sequence(config, Sequence::EMPTY)
    }

    /// Creates a tree rooted at `sequence`.
    ///
    /// # Errors
    ///
    /// - [`SetupError::Config`] if the config fails validation
    /// - [`SetupError::Sequence`] if `sequence` cannot arise from alternating
    ///   moves that start with the configured first mover
    #[instrument(skip(sequence), fields(sequence = %sequence))]
    pub fn from_sequence(config: SearchConfig, sequence: Sequence) -> Result<Self, SetupError> {
        config.validate()?;
        sequence.check_turn_order(config.first_mover())?;
        Ok(Self {
            config,
            nodes: vec![Node::new(sequence)],
            root: NodeId(0),
            current: NodeId(0),
        })
    }

    /// Returns the search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns the root node.
    pub fn root(&self) -> &Node {
        &self.nodes[self.root.0]
    }

    /// Returns the node the game currently stands at.
    pub fn current(&self) -> &Node {
        &self.nodes[self.current.0]
    }

    /// Id of the current node.
    pub fn current_id(&self) -> NodeId {
        self.current
    }

    /// Looks up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Children of `id` in generation order. Empty for unknown ids.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|child| &self.nodes[child.0])
    }

    /// Number of nodes attached so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The mark that moves next in `sequence`.
    pub fn mark_to_move(&self, sequence: &Sequence) -> Player {
        let first = self.config.first_mover();
        if sequence.mark_count() % 2 == 0 {
            first
        } else {
            first.opponent()
        }
    }

    /// True if MAX moves next from the current node.
    pub fn is_max_turn(&self) -> bool {
        self.mark_to_move(&self.current().sequence) == *self.config.goal()
    }

    /// Attaches the successors of `id` unless it is finished or already
    /// expanded. Returns the number of children.
    fn expand(&mut self, id: NodeId) -> usize {
        let sequence = self.nodes[id.0].sequence;
        if !self.nodes[id.0].children.is_empty() || sequence.to_board().status().is_terminal() {
            return self.nodes[id.0].children.len();
        }

        let mark = self.mark_to_move(&sequence);
        for child in sequence.successors(mark) {
            let child_id = NodeId(self.nodes.len());
            self.nodes.push(Node::new(child));
            self.nodes[id.0].children.push(child_id);
        }
        self.nodes[id.0].children.len()
    }

    /// Builds the whole tree below the root down to the configured depth.
    ///
    /// Finished positions are never expanded. Returns the node count.
    #[instrument(skip(self), fields(root = %self.root().sequence))]
    pub fn generate_states(&mut self) -> usize {
        let mut stack = vec![(self.root, usize::from(*self.config.depth()))];
        while let Some((id, depth)) = stack.pop() {
            if depth == 0 {
                continue;
            }
            self.expand(id);
            stack.extend(self.nodes[id.0].children.iter().map(|child| (*child, depth - 1)));
        }

        info!(nodes = self.nodes.len(), "State tree generated");
        self.nodes.len()
    }

    /// Scores `id` by minimax, looking at most `depth` plies ahead.
    ///
    /// Finished positions score directly and are not expanded. When the
    /// depth runs out the position gets its heuristic value. Otherwise the
    /// node is expanded and takes the maximum of its children's utilities if
    /// `maximizing`, the minimum if not. The result is cached on the node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn minimax(&mut self, id: NodeId, depth: usize, maximizing: bool) -> Utility {
        let goal = *self.config.goal();
        let status = self.nodes[id.0].sequence.to_board().status();

        let utility = if let Some(utility) = Utility::terminal(status, goal) {
            utility
        } else if depth == 0 {
            Utility::heuristic(status, goal)
        } else {
            let count = self.expand(id);
            let mut best: Option<Utility> = None;
            for index in 0..count {
                let child = self.nodes[id.0].children[index];
                let value = self.minimax(child, depth - 1, !maximizing);
                best = Some(match best {
                    None => value,
                    Some(current) if maximizing => current.max(value),
                    Some(current) => current.min(value),
                });
            }
            best.unwrap_or_else(|| Utility::heuristic(status, goal))
        };

        self.nodes[id.0].utility = Some(utility);
        utility
    }

    /// Runs minimax from the current node with the configured depth, capped
    /// at the number of empty cells.
    #[instrument(skip(self), fields(current = %self.current().sequence))]
    pub fn search(&mut self) -> Utility {
        let remaining = usize::from(MAX_DEPTH) - self.current().sequence.mark_count();
        let depth = usize::from(*self.config.depth()).min(remaining);
        let maximizing = self.is_max_turn();
        let utility = self.minimax(self.current, depth, maximizing);
        debug!(%utility, maximizing, nodes = self.nodes.len(), "Search complete");
        utility
    }

    /// Picks the next position for whoever moves from the current node.
    ///
    /// Searches first, then returns the first child in generation order with
    /// the best utility for the side to move: MAX prefers a win, then a draw,
    /// then a loss; MIN the reverse. Returns `None` if the game is over.
    #[instrument(skip(self), fields(current = %self.current().sequence))]
    pub fn minimax_decision(&mut self) -> Option<Sequence> {
        let maximizing = self.is_max_turn();
        self.search();

        let preference = if maximizing {
            [Utility::Win, Utility::Draw, Utility::Loss]
        } else {
            [Utility::Loss, Utility::Draw, Utility::Win]
        };

        let decision = preference.into_iter().find_map(|target| {
            self.children(self.current)
                .find(|child| child.utility == Some(target))
                .map(|child| child.sequence)
        });

        match decision {
            Some(sequence) => info!(%sequence, maximizing, "Move decided"),
            None => debug!("No move available"),
        }
        decision
    }

    /// Advances the current node to its child with `sequence`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidState`] if `sequence` is not among the legal
    /// successors of the current position.
    #[track_caller]
    #[instrument(skip(self, sequence), fields(sequence = %sequence))]
    pub fn change_state(&mut self, sequence: Sequence) -> Result<(), InvalidState> {
        self.expand(self.current);

        let next = self.nodes[self.current.0]
            .children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].sequence == sequence);

        match next {
            Some(id) => {
                debug!(node = %id, "State changed");
                self.current = id;
                Ok(())
            }
            None => Err(InvalidState::new(sequence, self.current().sequence)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::BoardStatus;

    fn seq(s: &str) -> Sequence {
        s.parse().unwrap()
    }

    #[test]
    fn test_turn_follows_ply_parity() {
        let tree = StateTree::new(SearchConfig::default()).unwrap();
        assert_eq!(tree.mark_to_move(&Sequence::EMPTY), Player::X);
        assert_eq!(tree.mark_to_move(&seq("x00000000")), Player::O);
        assert!(tree.is_max_turn());

        let tree = StateTree::new(SearchConfig::default().with_max_first(false)).unwrap();
        assert_eq!(tree.mark_to_move(&Sequence::EMPTY), Player::O);
        assert!(!tree.is_max_turn());
    }

    #[test]
    fn test_terminal_node_is_not_expanded() {
        let mut tree = StateTree::from_sequence(SearchConfig::default(), seq("xxxoo0000")).unwrap();
        assert_eq!(tree.search(), Utility::Win);
        assert!(tree.current().children().is_empty());
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_loss_for_goal_mark() {
        // X opened, so O is MAX moving second.
        let config = SearchConfig::default()
            .with_goal(Player::O)
            .with_max_first(false);
        let mut tree = StateTree::from_sequence(config, seq("xxxoo0000")).unwrap();
        assert_eq!(tree.search(), Utility::Loss);
    }

    #[test]
    fn test_depth_exhausted_scores_draw() {
        let mut tree = StateTree::new(SearchConfig::default()).unwrap();
        let root = tree.current_id();
        assert_eq!(tree.minimax(root, 0, true), Utility::Draw);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_generate_states_respects_depth() {
        let mut tree = StateTree::new(SearchConfig::default().with_depth(2)).unwrap();
        // 3 reduced openings, then 8 replies each.
        assert_eq!(tree.generate_states(), 1 + 3 + 3 * 8);
    }

    #[test]
    fn test_generate_states_stops_at_finished_games() {
        // X to move, one reply wins on the spot.
        let mut tree = StateTree::from_sequence(SearchConfig::default(), seq("xx0oo0000")).unwrap();
        tree.generate_states();
        let winning = tree
            .children(tree.current_id())
            .find(|child| child.sequence() == seq("xxxoo0000"))
            .unwrap();
        assert!(winning.children().is_empty());
        assert_eq!(winning.sequence().to_board().status(), BoardStatus::Won(Player::X));
    }

    #[test]
    fn test_minimax_caches_child_utilities() {
        let mut tree = StateTree::from_sequence(SearchConfig::default(), seq("xx0oo0000")).unwrap();
        tree.search();
        assert!(tree.children(tree.current_id()).all(|child| child.utility().is_some()));
        assert_eq!(tree.current().utility(), Some(Utility::Win));
    }

    #[test]
    fn test_change_state_expands_lazily() {
        let mut tree = StateTree::new(SearchConfig::default()).unwrap();
        tree.change_state(seq("0000x0000")).unwrap();
        assert_eq!(tree.current().sequence(), seq("0000x0000"));
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_change_state_rejects_unreachable() {
        let mut tree = StateTree::new(SearchConfig::default()).unwrap();
        let err = tree.change_state(seq("xo0000000")).unwrap_err();
        assert_eq!(err.requested, seq("xo0000000"));
        assert_eq!(err.current, Sequence::EMPTY);
        assert_eq!(tree.current().sequence(), Sequence::EMPTY);
    }

    #[test]
    fn test_decision_on_finished_game() {
        let mut tree = StateTree::from_sequence(SearchConfig::default(), seq("xoxxoxoxo")).unwrap();
        assert_eq!(tree.minimax_decision(), None);
    }

    #[test]
    fn test_zero_depth_config_rejected() {
        let err = StateTree::new(SearchConfig::default().with_depth(0)).unwrap_err();
        assert!(matches!(err, SetupError::Config(_)));
    }

    #[test]
    fn test_out_of_turn_sequence_rejected() {
        // X cannot have moved twice before O with X opening.
        let err = StateTree::from_sequence(SearchConfig::default(), seq("xx0000000")).unwrap_err();
        assert!(matches!(err, SetupError::Sequence(_)));

        // Nor can O lead when X opens.
        assert!(StateTree::from_sequence(SearchConfig::default(), seq("o00000000")).is_err());
    }

    #[test]
    fn test_search_depth_capped_at_empty_cells() {
        // One cell left and it completes X's left column.
        let mut tree = StateTree::from_sequence(SearchConfig::default(), seq("xoxxoo0xo")).unwrap();
        assert_eq!(tree.search(), Utility::Win);
        assert_eq!(tree.node_count(), 2);
    }
}
