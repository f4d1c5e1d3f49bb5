//! Confirmed customer orders.

use crate::{CoreError, CoreResult, Location, OrderId, Tick, TickInterval};

/// An order accepted for delivery.
///
/// Created by an order generator, planned by a restaurant dispatcher,
/// loaded onto a vehicle, and logically destroyed on delivery (the delivery
/// event carries the final, stamped copy).
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfirmedOrder {
    id: OrderId,
    /// Delivery target — must be a neighborhood node.
    location: Location,
    /// The restaurant that prepares the order.
    restaurant: Location,
    delivery_interval: TickInterval,
    food: Vec<String>,
    weight: f64,
    actual_delivery_tick: Option<Tick>,
}

impl ConfirmedOrder {
    /// Create an order.  The weight must be strictly positive.
    pub fn new(
        id: OrderId,
        location: Location,
        restaurant: Location,
        delivery_interval: TickInterval,
        food: Vec<String>,
        weight: f64,
    ) -> CoreResult<Self> {
        if !(weight > 0.0) {
            return Err(CoreError::NonPositiveWeight(weight));
        }
        Ok(Self {
            id,
            location,
            restaurant,
            delivery_interval,
            food,
            weight,
            actual_delivery_tick: None,
        })
    }

    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    #[inline]
    pub fn restaurant(&self) -> Location {
        self.restaurant
    }

    #[inline]
    pub fn delivery_interval(&self) -> TickInterval {
        self.delivery_interval
    }

    #[inline]
    pub fn food(&self) -> &[String] {
        &self.food
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// The tick the order was actually delivered, once it has been.
    #[inline]
    pub fn actual_delivery_tick(&self) -> Option<Tick> {
        self.actual_delivery_tick
    }

    /// Stamp the delivery tick.  May be called exactly once.
    pub fn mark_delivered(&mut self, tick: Tick) -> CoreResult<()> {
        if self.actual_delivery_tick.is_some() {
            return Err(CoreError::AlreadyDelivered(self.id));
        }
        self.actual_delivery_tick = Some(tick);
        Ok(())
    }
}
